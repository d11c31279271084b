//! Border style types

use super::Color;

/// Border settings per edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderStyle {
    /// Left border
    pub left: Option<BorderEdge>,
    /// Right border
    pub right: Option<BorderEdge>,
    /// Top border
    pub top: Option<BorderEdge>,
    /// Bottom border
    pub bottom: Option<BorderEdge>,
}

impl BorderStyle {
    /// Create a new border style with no borders
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four edges to the same edge fragment
    pub fn all(edge: BorderEdge) -> Self {
        Self {
            left: Some(edge),
            right: Some(edge),
            top: Some(edge),
            bottom: Some(edge),
        }
    }

    /// Set the bottom border
    pub fn with_bottom(mut self, edge: BorderEdge) -> Self {
        self.bottom = Some(edge);
        self
    }

    /// Overlay `other` on top of `self`, edge by edge and field by field
    pub fn merge(&mut self, other: &BorderStyle) {
        fn merge_edge(base: &mut Option<BorderEdge>, top: &Option<BorderEdge>) {
            match (base.as_mut(), top) {
                (Some(b), Some(t)) => {
                    b.style = t.style.or(b.style);
                    b.color = t.color.or(b.color);
                }
                (None, Some(t)) => *base = Some(*t),
                (_, None) => {}
            }
        }
        merge_edge(&mut self.left, &other.left);
        merge_edge(&mut self.right, &other.right);
        merge_edge(&mut self.top, &other.top);
        merge_edge(&mut self.bottom, &other.bottom);
    }
}

/// A single border edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    /// Line style
    pub style: Option<BorderLineStyle>,
    /// Line color
    pub color: Option<Color>,
}

impl BorderEdge {
    /// Create a border edge
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self {
            style: Some(style),
            color: Some(color),
        }
    }

    /// Edge fragment carrying only a line style
    pub fn styled(style: BorderLineStyle) -> Self {
        Self {
            style: Some(style),
            color: None,
        }
    }

    /// Edge fragment carrying only a color
    pub fn colored(color: Color) -> Self {
        Self {
            style: None,
            color: Some(color),
        }
    }
}

/// Border line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderLineStyle {
    /// No border
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
}

impl BorderLineStyle {
    /// Parse from the keyword used in markup (`thin`, `medium`, `thick`, `none`)
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "none" => Some(BorderLineStyle::None),
            "thin" => Some(BorderLineStyle::Thin),
            "medium" => Some(BorderLineStyle::Medium),
            "thick" => Some(BorderLineStyle::Thick),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_then_color_merge() {
        let mut border = BorderStyle::all(BorderEdge::styled(BorderLineStyle::Thin));
        border.merge(&BorderStyle::all(BorderEdge::colored(Color::RED)));

        let expected = BorderEdge::new(BorderLineStyle::Thin, Color::RED);
        assert_eq!(border.left, Some(expected));
        assert_eq!(border.bottom, Some(expected));
    }

    #[test]
    fn test_keyword() {
        assert_eq!(
            BorderLineStyle::from_keyword("medium"),
            Some(BorderLineStyle::Medium)
        );
        assert_eq!(BorderLineStyle::from_keyword("dashed"), None);
    }
}
