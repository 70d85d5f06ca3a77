use derive_more::{AsRef, Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A drawing color parsed from a config string: `#rgb`, `#rrggbb`,
/// `#rrggbbaa` or a CSS color name.
#[derive(
    Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr, Deref, From, Into, AsRef,
)]
pub struct ColorSpec(Srgba<f64>);

impl ColorSpec {
    pub fn new(color: Srgba<f64>) -> Self {
        Self(color)
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self(Srgba::new(red, green, blue, 1.0))
    }

    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }

    /// The same color with its alpha replaced.
    pub fn with_alpha(&self, alpha: f64) -> Srgba<f64> {
        let mut color = self.0;
        color.alpha = alpha;
        color
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

impl FromStr for ColorSpec {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        palette::named::from_str(&s.to_ascii_lowercase())
            .map(|c| Self::new(from_u8(c.red, c.green, c.blue, 255)))
            .ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.0.into_components();
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (to_byte(r), to_byte(g), to_byte(b), to_byte(a));
        if a == u8::MAX {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

fn from_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Srgba<f64> {
    Srgba::new(
        f64::from(red) / 255.0,
        f64::from(green) / 255.0,
        f64::from(blue) / 255.0,
        f64::from(alpha) / 255.0,
    )
}

fn parse_hex(hex: &str) -> Option<ColorSpec> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok();
    // single-digit channels double up, as in CSS
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        6 => (byte(0)?, byte(1)?, byte(2)?, 255),
        8 => (byte(0)?, byte(1)?, byte(2)?, byte(3)?),
        _ => return None,
    };
    Some(ColorSpec::new(from_u8(r, g, b, a)))
}
