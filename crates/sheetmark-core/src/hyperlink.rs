//! Cell hyperlinks

/// A hyperlink attached to a cell
///
/// Targets starting with `#` point inside the workbook (`#Sheet2!B5`).
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    /// Link target
    pub url: String,
    /// Tooltip shown on hover
    pub tooltip: Option<String>,
}

impl Hyperlink {
    /// Create a hyperlink without tooltip
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tooltip: None,
        }
    }

    /// Set the tooltip
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Check whether the target is a location inside the workbook
    pub fn is_internal(&self) -> bool {
        self.url.starts_with('#')
    }
}
