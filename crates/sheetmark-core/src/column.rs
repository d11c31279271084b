//! Column types

/// Column metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    /// Custom width in characters (None = default)
    pub width: Option<f64>,
    /// Column is hidden
    pub hidden: bool,
    /// Width is computed from content by the writer
    pub auto_size: bool,
    /// Column-level style index into the sheet style pool
    pub style_index: Option<u32>,
}

impl Column {
    /// Create a new column with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.hidden || self.auto_size || self.style_index.is_some()
    }
}
