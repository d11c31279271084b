//! Attribute grammar checks

use lazy_regex::regex_is_match;
use sheetmark_core::{CellAddress, CellRange, MAX_COLS, MAX_ROWS};

use crate::conditional::parse_conditional;
use crate::error::ValidationError;
use crate::schema::Annotation;

/// Value grammar of one annotation
#[derive(Debug, Clone, Copy)]
enum Rule {
    Any,
    NonEmpty,
    HexColor,
    Keywords(&'static [&'static str], &'static str),
    PositiveInt,
    Span(u32, &'static str),
    PositiveNumber,
    Margins,
    Autosize,
    CellRef,
    RangeRef,
    Conditional,
    Link,
}

const TRUE_FALSE: Rule = Rule::Keywords(&["true", "false"], "'true' or 'false'");

fn rule_for(annotation: Annotation) -> Rule {
    use Annotation::*;
    match annotation {
        Sheet => Rule::NonEmpty,
        Freeze => Rule::CellRef,
        Autosize => Rule::Autosize,
        Autofilter => Rule::RangeRef,
        DefaultColWidth | Zoom | Width | ImgWidth | ImgHeight => Rule::PositiveInt,
        Colspan => Rule::Span(MAX_COLS, "a positive integer no greater than 16384"),
        Rowspan => Rule::Span(MAX_ROWS, "a positive integer no greater than 1048576"),
        PrintOrientation => Rule::Keywords(&["portrait", "landscape"], "'portrait' or 'landscape'"),
        PrintFit => Rule::Keywords(&["width", "height", "page"], "'width', 'height' or 'page'"),
        PageMargins => Rule::Margins,
        TabColor | BgColor | BorderColor | FontColor => Rule::HexColor,
        Gridlines => Rule::Keywords(&["on", "off"], "'on' or 'off'"),
        Height | FontSize | CommentWidth | CommentHeight => Rule::PositiveNumber,
        Type => Rule::Keywords(
            &["string", "number", "bool", "date", "null"],
            "'string', 'number', 'bool', 'date' or 'null'",
        ),
        Border => Rule::Keywords(
            &["thin", "medium", "thick", "none"],
            "'thin', 'medium', 'thick' or 'none'",
        ),
        FontUnderline => Rule::Keywords(&["single", "double", "none"], "'single', 'double' or 'none'"),
        Locked | FontBold | FontItalic | CommentVisible => TRUE_FALSE,
        Conditional => Rule::Conditional,
        Link => Rule::Link,
        Hidden | Apply | Format | Align | Valign | Wrap | Formula | Hyperlink | LinkTooltip
        | Comment | CommentAuthor | DvList | NumberLocale | Image | FontName => Rule::Any,
    }
}

/// Validates `data-xls-*` attributes against the closed allow-list
///
/// In permissive mode every attribute passes; the interpreter then parses
/// values leniently and skips what it can't understand.
#[derive(Debug, Clone, Copy)]
pub struct AttributeValidator {
    strict: bool,
}

impl AttributeValidator {
    /// Create a validator
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Validator that rejects unknown attributes and invalid values
    pub fn strict() -> Self {
        Self::new(true)
    }

    /// Validator that accepts everything
    pub fn permissive() -> Self {
        Self::new(false)
    }

    /// Check whether strict mode is on
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Check one attribute
    pub fn assert_allowed(&self, name: &str, value: &str) -> Result<(), ValidationError> {
        if !self.strict {
            return Ok(());
        }

        let annotation = Annotation::from_name(name).ok_or_else(|| {
            ValidationError::UnknownAttribute {
                name: name.to_string(),
            }
        })?;

        let invalid = |expected: &'static str| ValidationError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        };

        match rule_for(annotation) {
            Rule::Any => Ok(()),
            Rule::NonEmpty if value.is_empty() => Err(invalid("a non-empty value")),
            Rule::NonEmpty => Ok(()),
            Rule::HexColor if is_hex_color(value) => Ok(()),
            Rule::HexColor => Err(invalid("a hex color (#RRGGBB)")),
            Rule::Keywords(allowed, _) if allowed.contains(&value) => Ok(()),
            Rule::Keywords(_, expected) => Err(invalid(expected)),
            Rule::PositiveInt if is_positive_int(value) => Ok(()),
            Rule::PositiveInt => Err(invalid("a positive integer")),
            Rule::Span(max, _) if parse_positive_int(value).is_some_and(|n| n <= max) => Ok(()),
            Rule::Span(_, expected) => Err(invalid(expected)),
            Rule::PositiveNumber if is_positive_number(value) => Ok(()),
            Rule::PositiveNumber => Err(invalid("a positive number")),
            Rule::Margins => check_margins(name, value),
            Rule::Autosize if is_autosize(value) => Ok(()),
            Rule::Autosize => Err(invalid(
                "'true', a column (A), a range (A:D) or a list (A,C,E)",
            )),
            Rule::CellRef if CellAddress::parse(value).is_ok() => Ok(()),
            Rule::CellRef => Err(invalid("a cell reference like B2")),
            Rule::RangeRef if CellRange::parse(value).is_ok() => Ok(()),
            Rule::RangeRef => Err(invalid("a range like A1:D1")),
            Rule::Conditional if parse_conditional(value).is_some() => Ok(()),
            Rule::Conditional => Err(invalid(
                "'value>N', 'value<N' or 'between:A:B' followed by |bg:RRGGBB, |font:RRGGBB or |bold",
            )),
            Rule::Link if is_link(value) => Ok(()),
            Rule::Link => Err(invalid(
                "a valid URL (http, https, ftp, mailto or #Sheet!A1)",
            )),
        }
    }
}

impl Default for AttributeValidator {
    fn default() -> Self {
        Self::strict()
    }
}

fn check_margins(name: &str, value: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() > 6 {
        return Err(ValidationError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            expected: "1 to 6 numbers (top,right,bottom,left,header,footer)",
        });
    }
    match parts.iter().find(|p| !is_numeric(p)) {
        Some(bad) => Err(ValidationError::InvalidValue {
            name: name.to_string(),
            value: bad.to_string(),
            expected: "a numeric margin",
        }),
        None => Ok(()),
    }
}

pub(crate) fn is_hex_color(value: &str) -> bool {
    regex_is_match!(r"^#?[0-9A-Fa-f]{6}$", value)
}

/// Digits only, at least 1, fits in `u32`
pub(crate) fn is_positive_int(value: &str) -> bool {
    parse_positive_int(value).is_some()
}

fn parse_positive_int(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok().filter(|n| *n > 0)
}

/// Plain decimal or scientific notation, optional sign, surrounding whitespace allowed
pub(crate) fn is_numeric(value: &str) -> bool {
    regex_is_match!(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$", value)
}

pub(crate) fn is_positive_number(value: &str) -> bool {
    is_numeric(value) && value.trim().parse::<f64>().map_or(false, |n| n > 0.0)
}

/// `true`, or uppercase column letters no further than XFD
fn is_autosize(value: &str) -> bool {
    if value == "true" {
        return true;
    }
    let shaped = regex_is_match!(r"^[A-Z]+:[A-Z]+$", value)
        || regex_is_match!(r"^[A-Z]+(,[A-Z]+)*$", value);
    shaped
        && value
            .split([':', ','])
            .all(|letters| CellAddress::letters_to_column(letters).is_ok())
}

fn is_link(value: &str) -> bool {
    regex_is_match!(r"^(?i)(https?|ftp)://[^\s/?#]+[^\s]*$", value)
        || regex_is_match!(r"^(?i)mailto:[^\s@]+@[^\s@]+$", value)
        || regex_is_match!(r"^#\S+$", value)
}
