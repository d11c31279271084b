//! Row types

/// Row metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Custom height in points (None = default)
    pub height: Option<f64>,
    /// Row is hidden
    pub hidden: bool,
}

impl Row {
    /// Create a new row with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this row has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some() || self.hidden
    }
}
