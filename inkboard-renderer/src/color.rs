//! Stroke color conversion.
//!
//! Stroke colors are stored as the CSS strings the brush widget produced.
//! Parsing is delegated to the CSS Color 4 parser re-exported by `peniko`,
//! so every form a browser canvas accepts (hex, `rgb()`, `hsl()`, `hwb()`,
//! `lab()`, the full named-color table) resolves here too. Surfaces get the
//! result as 8-bit straight-alpha sRGB.

use std::fmt;
use std::str::FromStr;

use peniko::color::{parse_color, Srgb};

use crate::{RenderError, RenderResult};

/// An 8-bit-per-channel straight-alpha color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from all four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse a CSS color string, converting it to sRGB.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidColor`] if the string is not a valid
    /// CSS color.
    pub fn parse(input: &str) -> RenderResult<Self> {
        let color = parse_color(&input.trim().to_ascii_lowercase())
            .map_err(|e| RenderError::InvalidColor(format!("{input:?}: {e}")))?;
        Ok(color.to_alpha_color::<Srgb>().into())
    }

    /// Whether the color is fully opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl From<peniko::Color> for Rgba {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl FromStr for Rgba {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats as `#rrggbb`, or `#rrggbbaa` when not opaque.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#F00").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#00ff0080").unwrap(), Rgba::new(0, 255, 0, 128));
        assert_eq!(Rgba::parse("#0008").unwrap(), Rgba::new(0, 0, 0, 136));
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("#gg0000").is_err());
    }

    #[test]
    fn test_functional_forms() {
        assert_eq!(Rgba::parse("rgb(0, 0, 255)").unwrap(), Rgba::rgb(0, 0, 255));
        assert_eq!(
            Rgba::parse("rgba(255, 255, 255, 0.5)").unwrap(),
            Rgba::new(255, 255, 255, 128)
        );
        assert_eq!(
            Rgba::parse("rgb(100% 0% 0% / 50%)").unwrap(),
            Rgba::new(255, 0, 0, 128)
        );
        assert!(Rgba::parse("rgb(1, 2)").is_err());
        assert!(Rgba::parse("rgb(a, b, c)").is_err());
        assert!(Rgba::parse("rgb(255,0,0,)").is_err());
    }

    #[test]
    fn test_hsl_and_hwb() {
        assert_eq!(Rgba::parse("hsl(0, 100%, 50%)").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("hwb(240 0% 0%)").unwrap(), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Rgba::parse("Red").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse(" transparent ").unwrap(), Rgba::TRANSPARENT);
        assert_eq!(Rgba::parse("darkred").unwrap(), Rgba::rgb(139, 0, 0));
        assert_eq!(Rgba::parse("rebeccapurple").unwrap(), Rgba::rgb(102, 51, 153));
        assert_eq!(Rgba::parse("CornflowerBlue").unwrap(), Rgba::rgb(100, 149, 237));
        assert!(Rgba::parse("not-a-color").is_err());
        assert!(Rgba::parse("").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for color in [Rgba::rgb(18, 52, 86), Rgba::new(1, 2, 3, 4)] {
            assert_eq!(Rgba::parse(&color.to_string()).unwrap(), color);
        }
        assert_eq!(Rgba::rgb(255, 0, 0).to_string(), "#ff0000");
    }
}
