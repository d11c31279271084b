//! # sheetmark-core
//!
//! Workbook intermediate representation produced by the sheetmark interpreter
//! and consumed by writers.
//!
//! This crate provides:
//! - [`CellValue`] - Typed cell payloads (strings, numbers, dates, formulas, images)
//! - [`CellAddress`] and [`CellRange`] - 1-based cell addressing and ranges
//! - [`StyleDescriptor`] - Mergeable style fragments (font, fill, borders, ...)
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use sheetmark_core::{CellValue, Workbook, Worksheet};
//!
//! let mut sheet = Worksheet::new("Report");
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value_at(1, 2, CellValue::Number(3.14)).unwrap();
//!
//! let mut workbook = Workbook::new();
//! workbook.push_worksheet(sheet);
//! assert_eq!(workbook.sheet_count(), 1);
//! ```

pub mod cell;
pub mod column;
pub mod comment;
pub mod conditional_format;
pub mod drawing;
pub mod error;
pub mod hyperlink;
pub mod row;
pub mod style;
pub mod validation;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellRange, CellValue, Merge};
pub use column::Column;
pub use comment::CellComment;
pub use conditional_format::{CfOperator, ConditionalRule};
pub use drawing::{Drawing, ImageSource};
pub use error::{Error, Result};
pub use hyperlink::Hyperlink;
pub use row::Row;
pub use validation::{DataValidation, ValidationErrorStyle, ValidationType};
pub use workbook::Workbook;
pub use worksheet::{FitMode, FreezePane, PageMargins, PageOrientation, PageSetup, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, StyleDescriptor, StylePool, Underline, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name, in Unicode code points
pub const MAX_SHEET_NAME_LEN: usize = 31;
