//! Error types for sheetmark-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the workbook IR
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u32),

    /// A merge overlaps another merge or covers an assigned cell
    #[error("Merge {range} conflicts with {existing}")]
    MergeConflict { range: String, existing: String },

    /// A value was written into the covered part of a merge
    #[error("Cell {cell} is covered by merged region {merge}")]
    CoveredCell { cell: String, merge: String },
}
