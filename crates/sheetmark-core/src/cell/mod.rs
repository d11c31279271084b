//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`Merge`] - A merged region expressed as anchor plus span
//! - [`CellData`] - Complete cell data including value, style and attachments

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator, Merge};
pub use storage::{CellData, CellStorage};
pub use value::CellValue;
