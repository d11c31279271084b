//! # sheetmark-csv
//!
//! Delimited-text writer for sheetmark worksheets. Only one sheet is
//! exported per file.

mod error;
mod options;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvWriteOptions, LineTerminator};
pub use writer::{serial_to_datetime, CsvWriter};
