//! Cell address and range types
//!
//! Rows and columns are 1-based everywhere in the IR: `A1` is row 1, column 1.

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "$B$2")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1, B=2, ..., XFD=16384)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// `$` markers are accepted and ignored.
    ///
    /// # Examples
    /// ```
    /// use sheetmark_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A1").unwrap();
    /// assert_eq!((addr.row, addr.col), (1, 1));
    ///
    /// let addr = CellAddress::parse("$AB$12").unwrap();
    /// assert_eq!((addr.row, addr.col), (12, 28));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = Self::letters_to_column(&s[col_start..pos])?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }

        Ok(Self { row, col })
    }

    /// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col
                .saturating_mul(26)
                .saturating_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }

        if col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }

        Ok(col)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalized so start is top-left
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column numbers
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some((start, end)) = s.split_once(':') {
            let start = CellAddress::parse(start)
                .map_err(|_| Error::InvalidRange(s.to_string()))?;
            let end =
                CellAddress::parse(end).map_err(|_| Error::InvalidRange(s.to_string()))?;
            Ok(Self::new(start, end))
        } else {
            let addr = CellAddress::parse(s).map_err(|_| Error::InvalidRange(s.to_string()))?;
            Ok(Self::single(addr))
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u32,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end.row {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);

        self.current_col += 1;
        if self.current_col > self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        }

        Some(addr)
    }
}

/// A merged region: an anchor cell plus a span in columns and rows
///
/// Only the anchor may hold a value; every other covered cell stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Merge {
    /// Top-left cell of the region
    pub anchor: CellAddress,
    /// Number of columns covered (>= 1)
    pub cols: u32,
    /// Number of rows covered (>= 1)
    pub rows: u32,
}

impl Merge {
    /// Create a merge; spans below 1 are raised to 1
    pub fn new(anchor: CellAddress, cols: u32, rows: u32) -> Self {
        Self {
            anchor,
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Last covered row, `None` past `u32::MAX`
    pub fn last_row(&self) -> Option<u32> {
        self.anchor.row.checked_add(self.rows - 1)
    }

    /// Last covered column, `None` past `u32::MAX`
    pub fn last_col(&self) -> Option<u32> {
        self.anchor.col.checked_add(self.cols - 1)
    }

    /// The covered range, anchor to `(col + cols - 1, row + rows - 1)`
    ///
    /// Ends that overflow are clamped to `u32::MAX`.
    pub fn range(&self) -> CellRange {
        CellRange::from_indices(
            self.anchor.row,
            self.anchor.col,
            self.last_row().unwrap_or(u32::MAX),
            self.last_col().unwrap_or(u32::MAX),
        )
    }

    /// Check whether a cell lies inside the region but is not the anchor
    pub fn covers_non_anchor(&self, addr: &CellAddress) -> bool {
        *addr != self.anchor && self.range().contains(addr)
    }
}

impl fmt::Display for Merge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(1), "A");
        assert_eq!(CellAddress::column_to_letters(2), "B");
        assert_eq!(CellAddress::column_to_letters(26), "Z");
        assert_eq!(CellAddress::column_to_letters(27), "AA");
        assert_eq!(CellAddress::column_to_letters(702), "ZZ");
        assert_eq!(CellAddress::column_to_letters(703), "AAA");
        assert_eq!(CellAddress::column_to_letters(16384), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellAddress::letters_to_column("AZ").unwrap(), 52);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16384);
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 27);
        assert!(CellAddress::letters_to_column("XFE").is_err());
        assert!(CellAddress::letters_to_column("A1").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("B2").unwrap();
        assert_eq!(addr, CellAddress::new(2, 2));

        let addr = CellAddress::parse("$A$1").unwrap();
        assert_eq!(addr, CellAddress::new(1, 1));

        let addr = CellAddress::parse("XFD1048576").unwrap();
        assert_eq!(addr, CellAddress::new(1_048_576, 16_384));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A-1").is_err());
        assert!(CellAddress::parse("A1048577").is_err());
    }

    #[test]
    fn test_cell_range_parse_and_display() {
        let range = CellRange::parse("A1:C3").unwrap();
        assert_eq!(range.start, CellAddress::new(1, 1));
        assert_eq!(range.end, CellAddress::new(3, 3));
        assert_eq!(range.to_string(), "A1:C3");

        let range = CellRange::parse("D4").unwrap();
        assert_eq!(range.to_string(), "D4");

        // Reversed corners are normalized
        let range = CellRange::parse("C3:A1").unwrap();
        assert_eq!(range.to_string(), "A1:C3");

        assert!(CellRange::parse("A1:").is_err());
    }

    #[test]
    fn test_cell_range_iterator() {
        let cells: Vec<_> = CellRange::parse("A1:B2").unwrap().cells().collect();
        assert_eq!(
            cells,
            vec![
                CellAddress::new(1, 1),
                CellAddress::new(1, 2),
                CellAddress::new(2, 1),
                CellAddress::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_merge_range() {
        let merge = Merge::new(CellAddress::new(1, 1), 3, 1);
        assert_eq!(merge.to_string(), "A1:C1");

        let merge = Merge::new(CellAddress::new(3, 1), 1, 2);
        assert_eq!(merge.to_string(), "A3:A4");
        assert!(merge.covers_non_anchor(&CellAddress::new(4, 1)));
        assert!(!merge.covers_non_anchor(&CellAddress::new(3, 1)));

        // Zero spans are clamped
        let merge = Merge::new(CellAddress::new(1, 1), 0, 0);
        assert_eq!((merge.cols, merge.rows), (1, 1));
    }

    #[test]
    fn test_merge_range_overflow_clamped() {
        let merge = Merge::new(CellAddress::new(2, 2), u32::MAX, u32::MAX);
        assert_eq!(merge.last_row(), None);
        assert_eq!(merge.last_col(), None);

        let range = merge.range();
        assert_eq!((range.end.row, range.end.col), (u32::MAX, u32::MAX));
    }
}
