//! Cell value types

use std::fmt;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Explicitly empty value
    #[default]
    Null,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// Date/time as a spreadsheet serial number (days since the 1900 epoch)
    Date(f64),

    /// String value
    String(String),

    /// Formula text, always starting with `=`
    Formula(String),

    /// Placeholder for an image anchored at this cell (index into the sheet's drawings)
    Image(usize),
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(s.into())
    }

    /// Create a formula value, prefixing `=` when missing
    ///
    /// ```
    /// use sheetmark_core::CellValue;
    ///
    /// assert_eq!(CellValue::formula("SUM(A1:A3)"), CellValue::Formula("=SUM(A1:A3)".into()));
    /// assert_eq!(CellValue::formula("=A1"), CellValue::Formula("=A1".into()));
    /// ```
    pub fn formula<S: AsRef<str>>(text: S) -> Self {
        let text = text.as_ref();
        if text.starts_with('=') {
            CellValue::Formula(text.to_string())
        } else {
            CellValue::Formula(format!("={}", text))
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    /// Try to get the value as a number (dates yield their serial)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) | CellValue::Date(n) => Some(*n),
            CellValue::Boolean(true) => Some(1.0),
            CellValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula(text) => Some(text),
            _ => None,
        }
    }

    /// Get the type name for error and log messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Date(_) => "date",
            CellValue::String(_) => "string",
            CellValue::Formula(_) => "formula",
            CellValue::Image(_) => "image",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null | CellValue::Image(_) => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) | CellValue::Date(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::Formula(text) => write!(f, "{}", text),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_prefix() {
        assert_eq!(
            CellValue::formula("SUM(B2:B3)").formula_text(),
            Some("=SUM(B2:B3)")
        );
        assert_eq!(CellValue::formula("=1+1").formula_text(), Some("=1+1"));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(1.5).as_number(), Some(1.5));
        assert_eq!(CellValue::Date(45000.0).as_number(), Some(45000.0));
        assert_eq!(CellValue::Boolean(true).as_number(), Some(1.0));
        assert_eq!(CellValue::string("1").as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Number(1234.5).to_string(), "1234.5");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_default_is_null() {
        assert!(CellValue::default().is_null());
    }
}
