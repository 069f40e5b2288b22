//! Color handling for barcodekit
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and [`ColorSpec`], the three forms a color can be
//! given in before it is resolved: a CSS name or hex string, a packed
//! `0xRRGGBB` integer, or an already resolved [`Color`].

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};
use image::Rgb;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use barcodekit_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create a new opaque `Color` from a packed `0xRRGGBB` value.
    ///
    /// Bits above the lowest 24 are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use barcodekit_core::color::Color;
    ///
    /// let color = Color::from_packed(0x336699);
    /// assert_eq!(color.to_rgb8().0, [0x33, 0x66, 0x99]);
    /// ```
    pub fn from_packed(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::from_rgb8(r, g, b)),
        }
    }

    /// Returns the sRGB triple of this color, ignoring alpha.
    pub fn to_rgb8(self) -> Rgb<u8> {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        Rgb([rgba.r, rgba.g, rgba.b])
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Opaque black, the default foreground.
    pub fn black() -> Self {
        Self::from_packed(0x000000)
    }

    /// Opaque white, the default background.
    pub fn white() -> Self {
        Self::from_packed(0xffffff)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

/// A color as supplied by a caller, not yet resolved to a [`Color`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// A CSS color name or hex string such as `"white"` or `"#ff8000"`.
    Name(String),
    /// A packed `0xRRGGBB` value.
    Packed(u32),
    /// An already resolved color.
    Resolved(Color),
}

impl ColorSpec {
    /// Resolves this specification to a concrete [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error message if a named color cannot be parsed.
    pub fn resolve(&self) -> Result<Color, String> {
        match self {
            Self::Name(name) => Color::new(name),
            Self::Packed(rgb) => Ok(Color::from_packed(*rgb)),
            Self::Resolved(color) => Ok(*color),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<u32> for ColorSpec {
    fn from(rgb: u32) -> Self {
        Self::Packed(rgb)
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::Resolved(color)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.to_rgb8(), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_color_to_rgb8_named_and_hex() {
        assert_eq!(Color::new("white").unwrap().to_rgb8(), Rgb([255, 255, 255]));
        assert_eq!(Color::new("#ff0000").unwrap().to_rgb8(), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_color_from_packed() {
        assert_eq!(Color::from_packed(0x336699).to_rgb8(), Rgb([0x33, 0x66, 0x99]));
        assert_eq!(Color::from_packed(0xff_000000).to_rgb8(), Rgb([0, 0, 0]));
        assert_approx_eq!(f32, Color::from_packed(0x123456).alpha(), 1.0);
    }

    #[test]
    fn test_color_spec_resolve() {
        let name = ColorSpec::from("white");
        assert_eq!(name.resolve().unwrap(), Color::new("white").unwrap());

        let packed = ColorSpec::from(0xffffffu32);
        assert_eq!(packed.resolve().unwrap().to_rgb8(), Rgb([255, 255, 255]));

        let resolved = ColorSpec::from(Color::black());
        assert_eq!(resolved.resolve().unwrap(), Color::black());

        assert!(ColorSpec::from("no-such-color").resolve().is_err());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
