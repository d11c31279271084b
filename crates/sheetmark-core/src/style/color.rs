//! Color representation

use std::fmt;

/// Color representation
///
/// Markup supplies 6-digit RGB colors; built-in styles use 8-digit ARGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub enum Color {
    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create from a hex string (e.g., "#FF0000", "FF0000" or "FFFF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::Rgb { r, g, b })
            }
            8 => {
                let a = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let r = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let g = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let b = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Color::Argb { a, r, g, b })
            }
            _ => None,
        }
    }

    /// Convert to hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
        }
    }

    /// Convert to ARGB hex string (always 8 characters, opaque for RGB)
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("FF{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
        }
    }

    /// Convert to RGB tuple
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Rgb { r, g, b } | Color::Argb { r, g, b, .. } => (*r, *g, *b),
        }
    }

    // Common colors
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
    /// Default hyperlink blue (`0563C1`)
    pub const HYPERLINK: Color = Color::Rgb {
        r: 0x05,
        g: 0x63,
        b: 0xC1,
    };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid hex color '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("0563c1"), Some(Color::HYPERLINK));
        assert_eq!(
            Color::from_hex("FFEEEEEE"),
            Some(Color::argb(255, 0xEE, 0xEE, 0xEE))
        );
        assert_eq!(Color::from_hex("FFF"), None);
        assert_eq!(Color::from_hex("GG0000"), None);
        assert_eq!(Color::from_hex("ééé"), None);
        assert_eq!(Color::from_hex("+1+2+3"), None);
        assert_eq!(Color::from_hex("#+FFFFFFF"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(0x12, 0xAB, 0x00).to_hex(), "12AB00");
        assert_eq!(Color::rgb(0x12, 0xAB, 0x00).to_argb_hex(), "FF12AB00");
        assert_eq!(Color::argb(0x80, 1, 2, 3).to_argb_hex(), "80010203");
        assert_eq!(Color::RED.to_string(), "#FF0000");
    }
}
