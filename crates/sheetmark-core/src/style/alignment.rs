//! Text alignment types

/// Text alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical alignment
    pub vertical: Option<VerticalAlignment>,
    /// Wrap text
    pub wrap_text: Option<bool>,
}

impl Alignment {
    /// Create an empty alignment fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Enable text wrapping
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    /// Overlay `other` on top of `self`, field by field
    pub fn merge(&mut self, other: &Alignment) {
        self.horizontal = other.horizontal.or(self.horizontal);
        self.vertical = other.vertical.or(self.vertical);
        self.wrap_text = other.wrap_text.or(self.wrap_text);
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// General (text left, numbers right)
    #[default]
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
    /// Justified
    Justify,
}

impl HorizontalAlignment {
    /// Map a markup keyword; anything unrecognized is `General`
    pub fn from_keyword(s: &str) -> Self {
        match s {
            "left" => HorizontalAlignment::Left,
            "center" => HorizontalAlignment::Center,
            "right" => HorizontalAlignment::Right,
            "justify" => HorizontalAlignment::Justify,
            _ => HorizontalAlignment::General,
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    /// Top aligned
    Top,
    /// Center aligned
    Center,
    /// Bottom aligned (default)
    #[default]
    Bottom,
}

impl VerticalAlignment {
    /// Map a markup keyword (`middle` means center); anything unrecognized is `Bottom`
    pub fn from_keyword(s: &str) -> Self {
        match s {
            "top" => VerticalAlignment::Top,
            "middle" | "center" => VerticalAlignment::Center,
            _ => VerticalAlignment::Bottom,
        }
    }
}
