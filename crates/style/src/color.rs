//! CSS colors as understood by Leaflet.

use crate::error::{Result, StyleError};
use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated CSS color.
///
/// The original spelling (lowercased) is preserved because it is what ends up
/// in the exported page; [`Color::rgb`] gives the resolved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    css: String,
    rgb: Srgb<u8>,
}

impl Color {
    /// Parse a CSS color name (`"coral"`) or hex literal (`"#f80"`, `"#ff8800"`).
    pub fn parse(input: &str) -> Result<Self> {
        let css = input.trim().to_ascii_lowercase();
        let rgb = match css.strip_prefix('#') {
            Some(hex) => parse_hex(hex),
            None => palette::named::from_str(&css),
        }
        .ok_or_else(|| StyleError::InvalidColor(input.to_string()))?;
        Ok(Self { css, rgb })
    }

    /// Build a color from raw channels; rendered as `#rrggbb`.
    pub fn from_rgb(rgb: Srgb<u8>) -> Self {
        Self {
            css: format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue),
            rgb,
        }
    }

    /// Look up a CSS named color known at compile time.
    ///
    /// Only used with the literal names of the built-in defaults; unknown
    /// names fall back to black.
    pub(crate) fn named(name: &'static str) -> Self {
        Self {
            css: name.to_string(),
            rgb: palette::named::from_str(name).unwrap_or(palette::named::BLACK),
        }
    }

    /// CSS text handed to Leaflet.
    pub fn as_css(&self) -> &str {
        &self.css
    }

    /// Resolved channels.
    pub fn rgb(&self) -> Srgb<u8> {
        self.rgb
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// palette slices by byte offset, so anything but ASCII hex digits is
// turned away first.
fn parse_hex(hex: &str) -> Option<Srgb<u8>> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Srgb::from_str(hex).ok()
}
