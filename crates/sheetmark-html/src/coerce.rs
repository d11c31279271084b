//! Cell text to typed value coercion
//!
//! Coercion never fails. Text that can't be read as the requested type is
//! kept as a string and a warning is logged.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use lazy_regex::regex_is_match;
use log::warn;
use sheetmark_core::CellValue;

use crate::validator::is_numeric;

/// Type requested through `data-xls-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedType {
    String,
    Number,
    Bool,
    Date,
    Null,
}

impl ForcedType {
    /// Parse a `data-xls-type` keyword
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "string" => Some(ForcedType::String),
            "number" => Some(ForcedType::Number),
            "bool" => Some(ForcedType::Bool),
            "date" => Some(ForcedType::Date),
            "null" => Some(ForcedType::Null),
            _ => None,
        }
    }
}

/// Result of coercing one cell's text
#[derive(Debug, Clone, PartialEq)]
pub enum TypedScalar {
    Null,
    /// Text stored as-is
    Text(String),
    /// Text that must stay a string even if it looks numeric
    ExplicitText(String),
    Number(f64),
    Boolean(bool),
    /// Spreadsheet serial date
    Date(f64),
}

impl TypedScalar {
    /// Check whether the value must bypass type inference downstream
    pub fn is_explicit(&self) -> bool {
        matches!(self, TypedScalar::ExplicitText(_))
    }
}

impl From<TypedScalar> for CellValue {
    fn from(scalar: TypedScalar) -> Self {
        match scalar {
            TypedScalar::Null => CellValue::Null,
            TypedScalar::Text(s) | TypedScalar::ExplicitText(s) => CellValue::String(s),
            TypedScalar::Number(n) => CellValue::Number(n),
            TypedScalar::Boolean(b) => CellValue::Boolean(b),
            TypedScalar::Date(d) => CellValue::Date(d),
        }
    }
}

/// Coerce trimmed cell text into a typed value
///
/// `locale` selects the number convention (`fr-*` or anything else).
pub fn coerce(raw: &str, forced: Option<ForcedType>, locale: Option<&str>) -> TypedScalar {
    if raw.is_empty() || forced == Some(ForcedType::Null) {
        return TypedScalar::Null;
    }

    match forced {
        Some(ForcedType::String) => TypedScalar::ExplicitText(raw.to_string()),
        Some(ForcedType::Number) => match parse_number(raw, locale) {
            Some(n) => TypedScalar::Number(n),
            None => {
                warn!("'{}' is not a number, keeping it as text", raw);
                TypedScalar::Text(raw.to_string())
            }
        },
        Some(ForcedType::Bool) => TypedScalar::Boolean(parse_bool(raw)),
        Some(ForcedType::Date) => match parse_date_serial(raw) {
            Some(serial) => TypedScalar::Date(serial),
            None => {
                warn!("'{}' is not a supported date, keeping it as text", raw);
                TypedScalar::Text(raw.to_string())
            }
        },
        Some(ForcedType::Null) => TypedScalar::Null,
        None => infer(raw, locale),
    }
}

fn infer(raw: &str, locale: Option<&str>) -> TypedScalar {
    let compact: String = raw.chars().filter(|c| !is_group_space(*c)).collect();
    if is_numeric(&compact) {
        if let Some(n) = parse_number(raw, locale) {
            return TypedScalar::Number(n);
        }
    }
    if regex_is_match!(r"^\d{4}-\d{2}-\d{2}", raw) {
        if let Some(serial) = parse_date_serial(raw) {
            return TypedScalar::Date(serial);
        }
        warn!("'{}' looks like a date but could not be parsed", raw);
    }
    TypedScalar::Text(raw.to_string())
}

/// Space, no-break space and narrow no-break space
fn is_group_space(c: char) -> bool {
    matches!(c, ' ' | '\u{00A0}' | '\u{202F}')
}

fn is_french(locale: Option<&str>) -> bool {
    locale.map_or(false, |l| {
        let lang = l.split(['-', '_']).next().unwrap_or(l);
        lang.eq_ignore_ascii_case("fr")
    })
}

/// Parse a number written with locale-specific separators
///
/// `fr` and `fr-*` read `1 234,56`; every other locale reads `1,234.56`.
pub fn parse_number(raw: &str, locale: Option<&str>) -> Option<f64> {
    let trimmed = raw.trim();
    let normalized: String = if is_french(locale) {
        trimmed
            .chars()
            .filter(|c| !is_group_space(*c))
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    } else {
        trimmed
            .chars()
            .filter(|c| *c != ',' && !is_group_space(*c))
            .collect()
    };

    if !is_numeric(&normalized) {
        return None;
    }
    normalized.parse().ok()
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.to_lowercase().as_str(),
        "1" | "true" | "vrai" | "yes" | "oui"
    )
}

/// Parse a date or date-time and convert it to a spreadsheet serial
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM-DD HH:MM[:SS[.fff]]` (space
/// or `T` separated) and RFC 3339 timestamps, whose local wall-clock time is
/// kept as written.
pub fn parse_date_serial(raw: &str) -> Option<f64> {
    parse_datetime(raw.trim()).and_then(datetime_to_serial)
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_local())
}

/// Days since 1899-12-31 with the 1900 leap-year bug preserved
pub fn datetime_to_serial(dt: NaiveDateTime) -> Option<f64> {
    let date = dt.date();
    if date.year() < 1900 {
        return None;
    }
    let leap_bug_end = NaiveDate::from_ymd_opt(1900, 3, 1)?;
    let epoch = if date >= leap_bug_end {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    };

    let days = (date - epoch).num_days() as f64;
    let time = dt.time();
    let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9;
    Some(days + seconds / 86_400.0)
}
