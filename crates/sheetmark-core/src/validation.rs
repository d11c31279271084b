//! Data validation
//!
//! Only inline choice lists are produced from markup.
//!
//! ## Example
//!
//! ```rust
//! use sheetmark_core::{DataValidation, ValidationType};
//!
//! let validation = DataValidation::list(["Yes", "No", "Say \"maybe\""]);
//! assert_eq!(
//!     validation.validation_type,
//!     ValidationType::List("\"Yes,No,Say \"\"maybe\"\"\"".to_string())
//! );
//! ```

/// Data validation rule for a cell
#[derive(Debug, Clone, PartialEq)]
pub struct DataValidation {
    /// Type of validation
    pub validation_type: ValidationType,
    /// Allow blank/empty cells
    pub allow_blank: bool,
    /// Show dropdown for list validation
    pub show_dropdown: bool,
    /// Show error alert when invalid data entered
    pub show_error_alert: bool,
    /// Error alert style
    pub error_style: ValidationErrorStyle,
}

impl DataValidation {
    /// Create a list validation from inline options
    ///
    /// Options are joined with `,`, embedded `"` are doubled and the whole
    /// list is wrapped in quotes. Blanks are allowed, the dropdown is shown
    /// and invalid input is rejected.
    pub fn list<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = options
            .into_iter()
            .map(|o| o.as_ref().replace('"', "\"\""))
            .collect::<Vec<_>>()
            .join(",");

        Self {
            validation_type: ValidationType::List(format!("\"{}\"", joined)),
            allow_blank: true,
            show_dropdown: true,
            show_error_alert: true,
            error_style: ValidationErrorStyle::Stop,
        }
    }

    /// The list source formula, if this is a list validation
    pub fn list_formula(&self) -> Option<&str> {
        match &self.validation_type {
            ValidationType::List(formula) => Some(formula),
        }
    }
}

/// Type of data validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationType {
    /// Value must be one of the quoted, comma-separated options
    List(String),
}

/// Error alert style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationErrorStyle {
    /// Reject invalid input
    #[default]
    Stop,
    /// Warn but allow
    Warning,
    /// Inform only
    Information,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_formula() {
        let v = DataValidation::list(vec!["Open".to_string(), "Closed".to_string()]);
        assert_eq!(v.list_formula(), Some("\"Open,Closed\""));
        assert!(v.allow_blank);
        assert!(v.show_dropdown);
        assert_eq!(v.error_style, ValidationErrorStyle::Stop);
    }

    #[test]
    fn test_list_escapes_quotes() {
        let v = DataValidation::list(["a\"b"]);
        assert_eq!(v.list_formula(), Some("\"a\"\"b\""));
    }
}
