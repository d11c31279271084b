//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue, Merge};
use crate::column::Column;
use crate::comment::CellComment;
use crate::drawing::Drawing;
use crate::error::{Error, Result};
use crate::row::Row;
use crate::style::{Color, StyleDescriptor, StylePool};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
    /// Resolved styles referenced by cells and columns
    styles: StylePool,
    /// Column metadata keyed by 1-based column
    columns: BTreeMap<u32, Column>,
    /// Row metadata keyed by 1-based row
    rows: BTreeMap<u32, Row>,
    /// Merged regions in registration order
    merges: Vec<Merge>,
    /// Images in registration order
    drawings: Vec<Drawing>,
    /// Freeze pane settings
    freeze_pane: Option<FreezePane>,
    /// Auto filter range
    auto_filter: Option<CellRange>,
    /// Default column width in characters
    default_column_width: Option<f64>,
    /// Zoom percentage
    zoom: Option<u32>,
    /// Tab color
    tab_color: Option<Color>,
    /// Gridlines shown on screen
    show_gridlines: bool,
    /// Print settings
    page_setup: PageSetup,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            styles: StylePool::new(),
            columns: BTreeMap::new(),
            rows: BTreeMap::new(),
            merges: Vec::new(),
            drawings: Vec::new(),
            freeze_pane: None,
            auto_filter: None,
            default_column_width: None,
            zoom: None,
            tab_color: None,
            show_gridlines: true,
            page_setup: PageSetup::default(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by 1-based row and column
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get a cell value by address string; missing cells read as `Null`
    pub fn get_value(&self, address: &str) -> Result<&CellValue> {
        const NULL: &CellValue = &CellValue::Null;
        Ok(self.cell(address)?.map(|c| &c.value).unwrap_or(NULL))
    }

    /// Get a cell value by 1-based row and column
    pub fn value_at(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(row, col).map(|c| &c.value)
    }

    /// Get the writable cell at a position, creating it if needed
    ///
    /// Fails when the position is out of bounds or is covered by a merge
    /// without being its anchor. New cells inherit the column style.
    pub fn cell_mut_at(&mut self, row: u32, col: u32) -> Result<&mut CellData> {
        self.check_writable(row, col)?;
        let column_style = self.columns.get(&col).and_then(|c| c.style_index);
        let is_new = self.cells.get(row, col).is_none();
        let cell = self.cells.get_or_create(row, col);
        if is_new {
            if let Some(idx) = column_style {
                cell.style_index = idx;
            }
        }
        Ok(cell)
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 1-based row and column
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u32,
        value: V,
    ) -> Result<()> {
        let cell = self.cell_mut_at(row, col)?;
        cell.value = value.into();
        cell.explicit_string = false;
        Ok(())
    }

    /// Store text that must stay a string even if it looks like a number or date
    pub fn set_cell_string_explicit_at<S: Into<String>>(
        &mut self,
        row: u32,
        col: u32,
        text: S,
    ) -> Result<()> {
        let cell = self.cell_mut_at(row, col)?;
        cell.value = CellValue::String(text.into());
        cell.explicit_string = true;
        Ok(())
    }

    /// Set a cell formula; `=` is prefixed when missing
    pub fn set_cell_formula_at(&mut self, row: u32, col: u32, formula: &str) -> Result<()> {
        self.set_cell_value_at(row, col, CellValue::formula(formula))
    }

    // === Styles ===

    /// Merge `style` on top of the current style of a cell
    pub fn apply_cell_style_at(
        &mut self,
        row: u32,
        col: u32,
        style: &StyleDescriptor,
    ) -> Result<()> {
        let current = self.cell_mut_at(row, col)?.style_index;
        let idx = self.styles.merge_into(current, style);
        self.cell_mut_at(row, col)?.style_index = idx;
        Ok(())
    }

    /// Merge `style` on top of every cell of a range
    pub fn apply_range_style(&mut self, range: &CellRange, style: &StyleDescriptor) -> Result<()> {
        for addr in range.cells() {
            if self.covering_merge(addr.row, addr.col).is_some() {
                continue;
            }
            self.apply_cell_style_at(addr.row, addr.col, style)?;
        }
        Ok(())
    }

    /// Resolved style of a cell, falling back to the column style
    pub fn cell_style_at(&self, row: u32, col: u32) -> &StyleDescriptor {
        let idx = match self.cells.get(row, col) {
            Some(cell) => cell.style_index,
            None => self
                .columns
                .get(&col)
                .and_then(|c| c.style_index)
                .unwrap_or(0),
        };
        self.style(idx)
    }

    /// Look up a pooled style; unknown indices give the default style
    pub fn style(&self, index: u32) -> &StyleDescriptor {
        self.styles
            .get(index)
            .unwrap_or_else(|| self.styles.default_style())
    }

    /// The style pool of this sheet
    pub fn style_pool(&self) -> &StylePool {
        &self.styles
    }

    // === Rows & Columns ===

    /// Column metadata, if any was set
    pub fn column(&self, col: u32) -> Option<&Column> {
        self.columns.get(&col)
    }

    /// Mutable column metadata, created on demand
    pub fn column_mut(&mut self, col: u32) -> Result<&mut Column> {
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }
        Ok(self.columns.entry(col).or_default())
    }

    /// All columns with metadata, ascending
    pub fn columns(&self) -> impl Iterator<Item = (u32, &Column)> {
        self.columns.iter().map(|(&c, col)| (c, col))
    }

    /// Set a column width in characters
    pub fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        self.column_mut(col)?.width = Some(width);
        Ok(())
    }

    /// Hide or show a column
    pub fn set_column_hidden(&mut self, col: u32, hidden: bool) -> Result<()> {
        self.column_mut(col)?.hidden = hidden;
        Ok(())
    }

    /// Mark a column for content-based width
    pub fn set_column_auto_size(&mut self, col: u32, auto_size: bool) -> Result<()> {
        self.column_mut(col)?.auto_size = auto_size;
        Ok(())
    }

    /// Merge `style` into the column style; cells created afterwards start from it
    pub fn apply_column_style(&mut self, col: u32, style: &StyleDescriptor) -> Result<()> {
        let current = self
            .columns
            .get(&col)
            .and_then(|c| c.style_index)
            .unwrap_or(0);
        let idx = self.styles.merge_into(current, style);
        self.column_mut(col)?.style_index = Some(idx);
        Ok(())
    }

    /// Row metadata, if any was set
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// All rows with metadata, ascending
    pub fn rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.iter().map(|(&r, row)| (r, row))
    }

    /// Set a row height in points
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        self.rows.entry(row).or_default().height = Some(height);
        Ok(())
    }

    // === Merged Cells ===

    /// Merged regions in registration order
    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Register a merged region
    ///
    /// Fails if it overlaps an existing merge or if a covered non-anchor cell
    /// already holds a value.
    pub fn merge_cells(&mut self, merge: Merge) -> Result<()> {
        let range = merge.range();
        if range.end.row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(range.end.row, MAX_ROWS));
        }
        if range.end.col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(range.end.col, MAX_COLS));
        }

        if let Some(existing) = self.merges.iter().find(|m| m.range().overlaps(&range)) {
            return Err(Error::MergeConflict {
                range: range.to_string(),
                existing: existing.to_string(),
            });
        }

        let covered = self
            .cells
            .cells_in_range(&range)
            .find(|(addr, cell)| *addr != merge.anchor && cell.has_value());
        if let Some((addr, _)) = covered {
            return Err(Error::CoveredCell {
                cell: addr.to_string(),
                merge: range.to_string(),
            });
        }

        self.merges.push(merge);
        Ok(())
    }

    /// The merge covering a position without being anchored there
    pub fn covering_merge(&self, row: u32, col: u32) -> Option<&Merge> {
        let addr = CellAddress::new(row, col);
        self.merges.iter().find(|m| m.covers_non_anchor(&addr))
    }

    // === Comments ===

    /// Attach a comment to a cell
    pub fn set_comment(&mut self, address: &str, comment: CellComment) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.cell_mut_at(addr.row, addr.col)?.comment = Some(comment);
        Ok(())
    }

    /// Get the comment of a cell
    pub fn comment(&self, address: &str) -> Result<Option<&CellComment>> {
        Ok(self.cell(address)?.and_then(|c| c.comment.as_ref()))
    }

    // === Drawings ===

    /// Register an image and return its index
    pub fn add_drawing(&mut self, drawing: Drawing) -> usize {
        self.drawings.push(drawing);
        self.drawings.len() - 1
    }

    /// Images in registration order
    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    // === Sheet Settings ===

    /// Get the freeze pane
    pub fn freeze_pane(&self) -> Option<FreezePane> {
        self.freeze_pane
    }

    /// Freeze rows above and columns left of `top_left`
    pub fn set_freeze_pane(&mut self, top_left: CellAddress) {
        self.freeze_pane = Some(FreezePane {
            row: top_left.row,
            col: top_left.col,
        });
    }

    /// Get the auto filter range
    pub fn auto_filter(&self) -> Option<CellRange> {
        self.auto_filter
    }

    /// Set the auto filter range
    pub fn set_auto_filter(&mut self, range: CellRange) {
        self.auto_filter = Some(range);
    }

    /// Get the default column width
    pub fn default_column_width(&self) -> Option<f64> {
        self.default_column_width
    }

    /// Set the default column width
    pub fn set_default_column_width(&mut self, width: f64) {
        self.default_column_width = Some(width);
    }

    /// Get the zoom percentage
    pub fn zoom(&self) -> Option<u32> {
        self.zoom
    }

    /// Set the zoom percentage
    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = Some(zoom);
    }

    /// Get the tab color
    pub fn tab_color(&self) -> Option<Color> {
        self.tab_color
    }

    /// Set the tab color
    pub fn set_tab_color(&mut self, color: Option<Color>) {
        self.tab_color = color;
    }

    /// Check whether gridlines are shown
    pub fn show_gridlines(&self) -> bool {
        self.show_gridlines
    }

    /// Show or hide gridlines
    pub fn set_show_gridlines(&mut self, show: bool) {
        self.show_gridlines = show;
    }

    /// Get the page setup
    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    /// Get the page setup for modification
    pub fn page_setup_mut(&mut self) -> &mut PageSetup {
        &mut self.page_setup
    }

    // === Iteration ===

    /// Get the used range (bounding box of all stored cells)
    pub fn used_range(&self) -> Option<CellRange> {
        let (min_row, min_col, max_row, max_col) = self.cells.bounds()?;
        Some(CellRange::from_indices(min_row, min_col, max_row, max_col))
    }

    /// Columns that hold at least one cell, ascending
    pub fn used_columns(&self) -> Vec<u32> {
        self.cells.used_columns()
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate all cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.cells.iter()
    }

    /// Iterate the cells of one row
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u32, &CellData)> {
        self.cells.row_cells(row)
    }

    fn check_writable(&self, row: u32, col: u32) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }
        if let Some(merge) = self.covering_merge(row, col) {
            return Err(Error::CoveredCell {
                cell: CellAddress::new(row, col).to_string(),
                merge: merge.to_string(),
            });
        }
        Ok(())
    }
}

/// Freeze pane settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePane {
    /// First unfrozen row
    pub row: u32,
    /// First unfrozen column
    pub col: u32,
}

impl FreezePane {
    /// Top-left cell of the scrollable pane
    pub fn top_left(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }
}

/// Page setup for printing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageSetup {
    /// Orientation
    pub orientation: PageOrientation,
    /// Fit-to-page mode
    pub fit: FitMode,
    /// Margins in inches (None = application default)
    pub margins: Option<PageMargins>,
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// Parse `portrait` or `landscape` (case-sensitive)
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "portrait" => Some(PageOrientation::Portrait),
            "landscape" => Some(PageOrientation::Landscape),
            _ => None,
        }
    }
}

/// Fit-to-page mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Print at normal scale
    #[default]
    None,
    /// One page wide, as many pages tall as needed
    Width,
    /// One page tall, as many pages wide as needed
    Height,
    /// Whole sheet on one page
    Page,
}

impl FitMode {
    /// Parse `width`, `height` or `page`
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "width" => Some(FitMode::Width),
            "height" => Some(FitMode::Height),
            "page" => Some(FitMode::Page),
            _ => None,
        }
    }

    /// Pages wide and tall, where 0 means unconstrained
    pub fn fit_to_pages(&self) -> Option<(u32, u32)> {
        match self {
            FitMode::None => None,
            FitMode::Width => Some((1, 0)),
            FitMode::Height => Some((0, 1)),
            FitMode::Page => Some((1, 1)),
        }
    }
}

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub header: f64,
    pub footer: f64,
}

impl PageMargins {
    /// Default for margins left unspecified
    pub const DEFAULT_MARGIN: f64 = 0.5;

    /// Build from up to six values in top, right, bottom, left, header,
    /// footer order; missing values default to 0.5
    pub fn from_values(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(Self::DEFAULT_MARGIN);
        Self {
            top: at(0),
            right: at(1),
            bottom: at(2),
            left: at(3),
            header: at(4),
            footer: at(5),
        }
    }
}
