//! # sheetmark
//!
//! Convert HTML tables annotated with `data-xls-*` attributes into an
//! in-memory spreadsheet workbook.
//!
//! ## Features
//!
//! - One worksheet per `<table data-xls-sheet>`, in document order
//! - Typed cells with locale-aware numbers, dates, booleans and formulas
//! - Named styles with presets, plus per-cell style directives
//! - Merges, hyperlinks, comments, list validations and images
//! - Page setup: freeze panes, autofilter, zoom, margins, print fit
//! - CSV export of a single sheet (`csv` feature, on by default)
//!
//! ## Example
//!
//! ```rust
//! use sheetmark::prelude::*;
//!
//! let html = r#"
//!   <table data-xls-sheet="Invoices" data-xls-freeze="A2">
//!     <tr><th data-xls-apply="th">Amount</th></tr>
//!     <tr><td data-xls-apply="money">1250.5</td></tr>
//!   </table>"#;
//!
//! let workbook = convert_html(html, &InterpretOptions::default(), &StyleRegistry::new()).unwrap();
//! let sheet = workbook.worksheet(0).unwrap();
//! assert_eq!(sheet.name(), "Invoices");
//! assert_eq!(sheet.value_at(2, 1), Some(&CellValue::Number(1250.5)));
//! ```

pub mod prelude;

use thiserror::Error;

// Re-export core types
pub use sheetmark_core::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, CellAddress, CellComment, CellData,
    CellRange, CellValue, CfOperator, Color, ConditionalRule, DataValidation, Drawing, FillStyle,
    FitMode, FontStyle, FreezePane, HorizontalAlignment, Hyperlink, ImageSource, Merge,
    PageMargins, PageOrientation, PageSetup, StyleDescriptor, Underline, ValidationErrorStyle,
    ValidationType, VerticalAlignment, Workbook, Worksheet, MAX_COLS, MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export the interpreter
pub use sheetmark_html::{
    directive_fragment, parse_html, sanitize_sheet_name, Annotation, AttributeValidator,
    InterpretOptions, LookupError, MergePolicy, SheetStyler, StyleRegistry, TableInterpreter,
    ValidationError,
};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use sheetmark_csv::{CsvError, CsvWriteOptions, CsvWriter, LineTerminator};

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from conversion or export
#[derive(Debug, Error)]
pub enum Error {
    /// Interpretation failed
    #[error(transparent)]
    Html(#[from] sheetmark_html::Error),

    /// CSV export failed
    #[cfg(feature = "csv")]
    #[error(transparent)]
    Csv(#[from] CsvError),
}

/// Interpret every annotated table of an HTML document
///
/// The registry is only read, so it can be shared across calls.
pub fn convert_html(
    html: &str,
    options: &InterpretOptions,
    registry: &StyleRegistry,
) -> Result<Workbook> {
    let workbook = TableInterpreter::new(registry, options.clone()).from_html(html)?;
    Ok(workbook)
}

/// Extension trait for exporting a [`Workbook`]
#[cfg(feature = "csv")]
pub trait WorkbookExt {
    /// Save one sheet as CSV
    fn save_csv<P: AsRef<std::path::Path>>(&self, sheet: usize, path: P) -> Result<()>;
}

#[cfg(feature = "csv")]
impl WorkbookExt for Workbook {
    fn save_csv<P: AsRef<std::path::Path>>(&self, sheet: usize, path: P) -> Result<()> {
        let worksheet = self.worksheet(sheet).ok_or(CsvError::SheetOutOfBounds {
            index: sheet,
            count: self.sheet_count(),
        })?;
        CsvWriter::write_file(worksheet, path, &CsvWriteOptions::default())?;
        Ok(())
    }
}
