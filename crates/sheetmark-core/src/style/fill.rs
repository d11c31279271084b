//! Fill style types

use super::Color;

/// Background fill; only solid fills can be expressed in markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillStyle {
    /// Solid fill color
    pub color: Option<Color>,
}

impl FillStyle {
    /// Create a solid fill
    pub fn solid(color: Color) -> Self {
        Self { color: Some(color) }
    }

    /// Overlay `other` on top of `self`
    pub fn merge(&mut self, other: &FillStyle) {
        self.color = other.color.or(self.color);
    }
}
