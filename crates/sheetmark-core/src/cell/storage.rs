//! Cell storage implementation
//!
//! Sparse row-based storage: only cells that were written are stored, in a
//! `BTreeMap<row, BTreeMap<col, CellData>>` so iteration is row-major.

use std::collections::BTreeMap;

use super::{CellAddress, CellRange, CellValue};
use crate::comment::CellComment;
use crate::hyperlink::Hyperlink;
use crate::validation::DataValidation;

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the worksheet style pool (0 = default style)
    pub style_index: u32,
    /// Value was written through the explicit-string path and must never be
    /// reinterpreted as a number or date
    pub explicit_string: bool,
    /// Hyperlink attached to the cell
    pub hyperlink: Option<Hyperlink>,
    /// Comment attached to the cell
    pub comment: Option<CellComment>,
    /// List validation attached to the cell
    pub validation: Option<DataValidation>,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self {
            value,
            style_index,
            ..Self::default()
        }
    }

    /// Check if this cell carries a value (anything other than null)
    pub fn has_value(&self) -> bool {
        !self.value.is_null()
    }

    /// Check if this cell is effectively empty (no value, default style, no attachments)
    pub fn is_empty(&self) -> bool {
        self.value.is_null()
            && self.style_index == 0
            && self.hyperlink.is_none()
            && self.comment.is_none()
            && self.validation.is_none()
    }
}

/// Sparse row-based storage for worksheet cells
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u32, CellData>>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u32) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, row: u32, col: u32) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Get a cell, creating an empty one if it doesn't exist
    pub fn get_or_create(&mut self, row: u32, col: u32) -> &mut CellData {
        self.rows.entry(row).or_default().entry(col).or_default()
    }

    /// Set the value of a cell, keeping its style and attachments
    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        let cell = self.get_or_create(row, col);
        cell.value = value;
        cell.explicit_string = false;
    }

    /// Replace a whole cell
    pub fn insert(&mut self, row: u32, col: u32, data: CellData) {
        self.rows.entry(row).or_default().insert(col, data);
    }

    /// Remove a cell, returning its data
    pub fn remove(&mut self, row: u32, col: u32) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if no cells are stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, data)| (CellAddress::new(row, col), data))
        })
    }

    /// Iterate the cells of one row in column order
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u32, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }

    /// Stored cells inside `range`, row-major
    ///
    /// Only stored cells are visited, whatever the size of the range.
    pub fn cells_in_range<'a>(
        &'a self,
        range: &CellRange,
    ) -> impl Iterator<Item = (CellAddress, &'a CellData)> + 'a {
        let cols = range.start.col..=range.end.col;
        self.rows
            .range(range.start.row..=range.end.row)
            .flat_map(move |(&row, cells)| {
                cells
                    .range(cols.clone())
                    .map(move |(&col, data)| (CellAddress::new(row, col), data))
            })
    }

    /// Bounds of the used area as `(min_row, min_col, max_row, max_col)`
    pub fn bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;
        let mut min_col = u32::MAX;
        let mut max_col = 0;
        for cols in self.rows.values() {
            if let (Some(&first), Some(&last)) = (cols.keys().next(), cols.keys().next_back()) {
                min_col = min_col.min(first);
                max_col = max_col.max(last);
            }
        }
        Some((min_row, min_col, max_row, max_col))
    }

    /// Columns that hold at least one cell, ascending
    pub fn used_columns(&self) -> Vec<u32> {
        let mut cols: Vec<u32> = self
            .rows
            .values()
            .flat_map(|r| r.keys().copied())
            .collect();
        cols.sort_unstable();
        cols.dedup();
        cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut storage = CellStorage::new();
        storage.set_value(1, 1, CellValue::Number(42.0));
        storage.set_value(3, 2, CellValue::string("x"));

        assert_eq!(storage.get(1, 1).unwrap().value, CellValue::Number(42.0));
        assert!(storage.get(2, 2).is_none());
        assert_eq!(storage.cell_count(), 2);
    }

    #[test]
    fn test_set_value_keeps_style() {
        let mut storage = CellStorage::new();
        storage.get_or_create(1, 1).style_index = 3;
        storage.set_value(1, 1, CellValue::Boolean(true));
        assert_eq!(storage.get(1, 1).unwrap().style_index, 3);
    }

    #[test]
    fn test_iteration_order_and_bounds() {
        let mut storage = CellStorage::new();
        storage.set_value(2, 5, CellValue::Number(1.0));
        storage.set_value(1, 3, CellValue::Number(2.0));
        storage.set_value(2, 1, CellValue::Number(3.0));

        let addrs: Vec<_> = storage.iter().map(|(a, _)| a.to_string()).collect();
        assert_eq!(addrs, vec!["C1", "A2", "E2"]);
        assert_eq!(storage.bounds(), Some((1, 1, 2, 5)));
        assert_eq!(storage.used_columns(), vec![1, 3, 5]);
    }

    #[test]
    fn test_cells_in_range() {
        let mut storage = CellStorage::new();
        storage.set_value(1, 1, CellValue::Number(1.0));
        storage.set_value(2, 3, CellValue::Number(2.0));
        storage.set_value(5, 2, CellValue::Number(3.0));
        storage.set_value(3, 9, CellValue::Number(4.0));

        let range = CellRange::from_indices(2, 2, 1_048_576, 16_384);
        let addrs: Vec<_> = storage
            .cells_in_range(&range)
            .map(|(a, _)| a.to_string())
            .collect();
        assert_eq!(addrs, vec!["C2", "I3", "B5"]);
    }

    #[test]
    fn test_remove_drops_empty_rows() {
        let mut storage = CellStorage::new();
        storage.set_value(4, 4, CellValue::Null);
        assert!(storage.remove(4, 4).is_some());
        assert!(storage.is_empty());
        assert_eq!(storage.bounds(), None);
    }
}
