//! Error types for sheetmark-html

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an interpretation
#[derive(Debug, Error)]
pub enum Error {
    /// The document holds no `<table data-xls-sheet>`
    #[error("No <table data-xls-sheet> found in the document")]
    Structural,

    /// An annotation is unknown or carries an invalid value
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A named style does not exist
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// An image could not be resolved
    #[error("Image not found: {src} ({reason})")]
    Resource { src: String, reason: String },

    /// Workbook IR error
    #[error("Core error: {0}")]
    Core(#[from] sheetmark_core::Error),

    /// A failure while walking one table
    #[error("Table #{index} (sheet '{sheet}'): {source}")]
    Table {
        index: usize,
        sheet: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The error underneath any [`Error::Table`] wrapping
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Table { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Annotation grammar violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Attribute outside the closed `data-xls-*` allow-list
    #[error("Attribute not allowed: {name}")]
    UnknownAttribute { name: String },

    /// Attribute value does not match its grammar
    #[error("Invalid value '{value}' for {name}: expected {expected}")]
    InvalidValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    /// A merge overlaps an earlier merge of the same sheet
    #[error("Merge {range} overlaps merged region {existing}")]
    MergeConflict { range: String, existing: String },

    /// A cell was placed inside the covered part of a merge
    #[error("Cell {cell} lies inside merged region {merge}")]
    CoveredCell { cell: String, merge: String },
}

/// A named style is missing from the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown named style '{name}'. Known styles: [{}]", .known.join(", "))]
pub struct LookupError {
    /// Requested name
    pub name: String,
    /// Names the registry knows
    pub known: Vec<String>,
}

impl Error {
    pub(crate) fn from_core(err: sheetmark_core::Error) -> Self {
        match err {
            sheetmark_core::Error::MergeConflict { range, existing } => {
                Error::Validation(ValidationError::MergeConflict { range, existing })
            }
            sheetmark_core::Error::CoveredCell { cell, merge } => {
                Error::Validation(ValidationError::CoveredCell { cell, merge })
            }
            other => Error::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_message_lists_known_styles() {
        let err = LookupError {
            name: "nope".into(),
            known: vec!["date".into(), "int".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown named style 'nope'. Known styles: [date, int]"
        );
    }

    #[test]
    fn test_root_cause_unwraps_table() {
        let err = Error::Table {
            index: 1,
            sheet: "Data".into(),
            source: Box::new(Error::Resource {
                src: "/missing.png".into(),
                reason: "no such file".into(),
            }),
        };
        assert!(err.to_string().contains("/missing.png"));
        assert!(matches!(err.root_cause(), Error::Resource { .. }));
    }

    #[test]
    fn test_core_merge_errors_become_validation_errors() {
        let err = Error::from_core(sheetmark_core::Error::CoveredCell {
            cell: "A2".into(),
            merge: "A1:A3".into(),
        });
        assert!(matches!(
            err,
            Error::Validation(ValidationError::CoveredCell { .. })
        ));
    }
}
