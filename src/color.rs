//! 24-bit RGB colors in `#rrggbb` form

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB color packed as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const RED: Color = Color(0xFF0000);
    pub const WINDOW: Color = Color(0x333333);
    pub const HEADLIGHT: Color = Color(0xFFFF00);

    /// Largest value a packed color can hold
    pub const MAX: u32 = 0xFF_FFFF;

    pub const fn from_rgb(rgb: u32) -> Self {
        Color(rgb & Self::MAX)
    }

    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(Color),
            3 => {
                let short = u32::from_str_radix(hex, 16).ok()?;
                let r = (short >> 8) & 0xF;
                let g = (short >> 4) & 0xF;
                let b = short & 0xF;
                Some(Color((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting_pads_to_six_digits() {
        assert_eq!(Color::from_rgb(0x00ab12).to_string(), "#00ab12");
        assert_eq!(Color::RED.to_string(), "#ff0000");
    }

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("333333"), Some(Color::WINDOW));
        assert_eq!(Color::from_hex("#ff0"), Some(Color::HEADLIGHT));
        assert_eq!(Color::from_hex("#ABCDEF"), Some(Color::from_rgb(0xABCDEF)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#+12345"), None);
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_string(&Color::from_rgb(0x0000ff)).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::from_rgb(0x0000ff));
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
