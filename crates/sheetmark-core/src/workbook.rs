//! Workbook type - the main document structure

use crate::worksheet::Worksheet;

/// A workbook (spreadsheet document)
///
/// Sheets keep the order they were pushed in. Names are not required to be
/// unique; callers that need distinct names handle that before pushing.
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Append a worksheet, returning its index
    pub fn push_worksheet(&mut self, worksheet: Worksheet) -> usize {
        self.worksheets.push(worksheet);
        self.worksheets.len() - 1
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get the first worksheet with the given name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of the first worksheet with the given name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Sheet names in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name()).collect()
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }
}
