//! Font style types

use super::Color;

/// Font settings; unset fields inherit from whatever the fragment is merged onto
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontStyle {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    /// Bold
    pub bold: Option<bool>,
    /// Italic
    pub italic: Option<bool>,
    /// Underline style
    pub underline: Option<Underline>,
    /// Font color
    pub color: Option<Color>,
}

impl FontStyle {
    /// Create an empty font fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = Some(underline);
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Overlay `other` on top of `self`, field by field
    pub fn merge(&mut self, other: &FontStyle) {
        if other.name.is_some() {
            self.name = other.name.clone();
        }
        self.size = other.size.or(self.size);
        self.bold = other.bold.or(self.bold);
        self.italic = other.italic.or(self.italic);
        self.underline = other.underline.or(self.underline);
        self.color = other.color.or(self.color);
    }

    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.map(f64::to_bits).hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.underline.hash(state);
        self.color.hash(state);
    }
}

impl Eq for FontStyle {}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Underline {
    /// No underline
    #[default]
    None,
    /// Single underline
    Single,
    /// Double underline
    Double,
}

impl Underline {
    /// Parse from the keyword used in markup (`single`, `double`, `none`)
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Underline::Single),
            "double" => Some(Underline::Double),
            "none" => Some(Underline::None),
            _ => None,
        }
    }
}
