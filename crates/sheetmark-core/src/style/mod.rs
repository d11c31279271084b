//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`StyleDescriptor`] - A mergeable style fragment
//! - [`FontStyle`] - Font settings
//! - [`FillStyle`] - Background fill
//! - [`BorderStyle`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`Color`] - Color representation
//!
//! Every field of a descriptor is optional. Merging overlays a later
//! descriptor on an earlier one field by field, so a fragment that only sets
//! a font color leaves an inherited fill untouched.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod pool;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::FillStyle;
pub use font::{FontStyle, Underline};
pub use pool::StylePool;

use crate::conditional_format::ConditionalRule;

/// Complete or partial cell style
///
/// Styles are deduplicated per sheet via [`StylePool`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StyleDescriptor {
    /// Font settings
    pub font: FontStyle,
    /// Fill/background settings
    pub fill: FillStyle,
    /// Border settings
    pub border: BorderStyle,
    /// Text alignment
    pub alignment: Alignment,
    /// Number format code
    pub number_format: Option<String>,
    /// Cell protection: locked when the sheet is protected
    pub locked: Option<bool>,
    /// Conditional formatting rules, evaluated in order
    pub conditionals: Vec<ConditionalRule>,
}

impl StyleDescriptor {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = Some(bold);
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = Some(italic);
        self
    }

    /// Set underline
    pub fn underline(mut self, underline: Underline) -> Self {
        self.font.underline = Some(underline);
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = Some(size);
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = Some(name.into());
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = Some(color);
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::solid(color);
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.alignment.vertical = Some(align);
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = Some(wrap);
        self
    }

    /// Set the border
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Set cell protection
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Append a conditional rule
    pub fn conditional(mut self, rule: ConditionalRule) -> Self {
        self.conditionals.push(rule);
        self
    }

    /// Overlay `other` on top of `self`: set fields of `other` win,
    /// conditional rules accumulate
    pub fn merge(&mut self, other: &StyleDescriptor) {
        self.font.merge(&other.font);
        self.fill.merge(&other.fill);
        self.border.merge(&other.border);
        self.alignment.merge(&other.alignment);
        if other.number_format.is_some() {
            self.number_format = other.number_format.clone();
        }
        self.locked = other.locked.or(self.locked);
        self.conditionals.extend(other.conditionals.iter().cloned());
    }

    /// Consuming variant of [`merge`](Self::merge)
    pub fn merged(mut self, other: &StyleDescriptor) -> Self {
        self.merge(other);
        self
    }

    /// Check if nothing is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::hash::Hash for StyleDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.fill.hash(state);
        self.border.hash(state);
        self.alignment.hash(state);
        self.number_format.hash(state);
        self.locked.hash(state);
        self.conditionals.hash(state);
    }
}

impl Eq for StyleDescriptor {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_is_field_wise() {
        let row = StyleDescriptor::new()
            .fill_color(Color::rgb(0xEE, 0xEE, 0xEE))
            .bold(true);
        let cell = StyleDescriptor::new()
            .number_format("0.00")
            .horizontal_alignment(HorizontalAlignment::Right);
        let direct = StyleDescriptor::new().bold(false);

        let resolved = row.merged(&cell).merged(&direct);

        assert_eq!(
            resolved,
            StyleDescriptor::new()
                .fill_color(Color::rgb(0xEE, 0xEE, 0xEE))
                .bold(false)
                .number_format("0.00")
                .horizontal_alignment(HorizontalAlignment::Right)
        );
    }

    #[test]
    fn test_conditionals_accumulate() {
        let a = StyleDescriptor::new().conditional(ConditionalRule::greater_than(1.0));
        let b = StyleDescriptor::new().conditional(ConditionalRule::less_than(0.0));
        assert_eq!(a.merged(&b).conditionals.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(StyleDescriptor::new().is_empty());
        assert!(!StyleDescriptor::new().locked(false).is_empty());
    }
}
