//! Prelude module - common imports for sheetmark users
//!
//! ```rust
//! use sheetmark::prelude::*;
//! ```

pub use crate::{
    convert_html,
    // Cell types
    CellAddress,
    CellRange,
    CellValue,
    // Style types
    Color,
    // Errors
    Error,
    HorizontalAlignment,
    // Interpreter
    InterpretOptions,
    MergePolicy,
    Result,
    StyleDescriptor,
    StyleRegistry,
    TableInterpreter,
    VerticalAlignment,
    // Main types
    Workbook,
    Worksheet,
};

#[cfg(feature = "csv")]
pub use crate::{CsvWriteOptions, CsvWriter, WorkbookExt};
