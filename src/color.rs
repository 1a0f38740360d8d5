//! Colour and border styling attached to widget nodes.
//!
//! Colours are plain RGBA values. [`Color::parse`] accepts `#rrggbb`, `#rgb`
//! and a small set of named colours so that application code and tests can
//! write styles compactly.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An 8-bit-per-channel RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(205, 49, 49);
    pub const GREEN: Color = Color::rgb(13, 188, 121);
    pub const BLUE: Color = Color::rgb(36, 114, 200);
    pub const GREY: Color = Color::rgb(128, 128, 128);

    /// An opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A colour with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether painting this colour would have no visible effect.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parse a colour string.
    ///
    /// Supports:
    /// - Hex colours: `#rrggbb` or `#rgb`
    /// - Named colours: `black`, `white`, `red`, `green`, `blue`,
    ///   `grey`/`gray`, `transparent`
    ///
    /// Returns `None` if the string cannot be parsed.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        match s.to_ascii_lowercase().as_str() {
            "black" => Some(Color::BLACK),
            "white" => Some(Color::WHITE),
            "red" => Some(Color::RED),
            "green" => Some(Color::GREEN),
            "blue" => Some(Color::BLUE),
            "grey" | "gray" => Some(Color::GREY),
            "transparent" => Some(Color::TRANSPARENT),
            _ => None,
        }
    }
}

/// Parse a hex colour string (without the leading `#`).
fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // Expand: 0xA -> 0xAA
            Some(Color::rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Border
// ---------------------------------------------------------------------------

/// A solid border stroked inside a node's rect.
///
/// The border width also insets the content box that a container lays its
/// children out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    pub color: Color,
    pub width: u32,
}

impl Border {
    /// Create a border.
    pub const fn new(color: Color, width: u32) -> Self {
        Self { color, width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_six_digits() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::rgb(255, 128, 0)));
    }

    #[test]
    fn parse_hex_three_digits_expands() {
        assert_eq!(Color::parse("#f0a"), Some(Color::rgb(255, 0, 170)));
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(Color::parse(" White "), Some(Color::WHITE));
        assert_eq!(Color::parse("gray"), Some(Color::GREY));
        assert_eq!(Color::parse("transparent"), Some(Color::TRANSPARENT));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("chartreuse"), None);
        assert_eq!(Color::parse("#ééé"), None);
    }

    #[test]
    fn transparent_flag() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }
}
