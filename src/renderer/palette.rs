//! Colors and line widths shared by every screen

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS color string for the canvas API
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

pub const BACKGROUND: Color = Color::rgb(0xF7, 0xF4, 0xEA);
pub const LINE: Color = Color::rgb(0x00, 0x00, 0x00);
pub const TEXT: Color = LINE;
pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
/// Sponge yellow
pub const HIGHLIGHT: Color = Color::rgb(0xF3, 0xC8, 0x5F);
/// Pastel blue used for progress and dirt
pub const SECONDARY: Color = Color::rgb(0xAA, 0xB7, 0xE8);
pub const START_TITLE: Color = Color::rgb(0x45, 0xA8, 0xFF);
pub const HINT_TEXT: Color = Color::rgb(0x88, 0x88, 0x88);
pub const GUIDE_RING_START: Color = Color::rgba(0xCC, 0xCC, 0xCC, 0.0);
pub const GUIDE_RING_END: Color = Color::rgb(0xCC, 0xCC, 0xCC);
pub const BUBBLE_LIGHT: Color = Color::rgb(0x45, 0xD3, 0xFF);
pub const BUBBLE_DEEP: Color = Color::rgb(0x45, 0x8F, 0xFF);
pub const BUBBLE_OUTLINE: Color = Color::rgb(0x00, 0x69, 0xD8);
pub const WARMUP_TRACK: Color = Color::rgb(0xDD, 0xDD, 0xDD);
/// Translucent tea brown for the stain layer
pub const TEA_STAIN: Color = Color::rgba(0x8B, 0x45, 0x13, 0.1);
pub const PANEL_FILL: Color = Color::rgba(0xFF, 0xFF, 0xFF, 0.9);
pub const PANEL_PLACEHOLDER: Color = Color::rgb(0xD1, 0xD5, 0xDB);
pub const TIP_TEXT: Color = Color::rgb(0x1F, 0x29, 0x37);

pub const LINE_WIDTH_STANDARD: f32 = 4.0;
pub const LINE_WIDTH_THIN: f32 = 2.0;
pub const LINE_WIDTH_TITLE_STROKE: f32 = 1.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF9F1C"), Some(Color::rgb(0xFF, 0x9F, 0x1C)));
        assert_eq!(Color::from_hex("#1a535c"), Some(Color::rgb(0x1A, 0x53, 0x5C)));
        assert_eq!(Color::from_hex("FF9F1C"), None);
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
    }

    #[test]
    fn test_css_output() {
        assert_eq!(HIGHLIGHT.css(), "#F3C85F");
        assert_eq!(TEA_STAIN.css(), "rgba(139, 69, 19, 0.1)");
    }
}
