#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Color primitives shared by every rendering surface of the dashboard.
//!
//! The map fill colors, the legend, the circular progress rings and the
//! flower chart all derive their colors from the functions in this crate,
//! which is what keeps them in agreement for the same score:
//!
//! - [`Rgb`] with its lowercase `#rrggbb` hex codec,
//! - [`interpolate`] for linear two-color gradients,
//! - [`normalize`] for mapping raw scores onto a `[0, 1]` ratio.

mod interpolate;
mod normalize;

pub use interpolate::interpolate;
pub use normalize::{
    ScoreWindow, format_percent, normalize, normalize_default, normalize_windowed,
    scale_to_window, to_percent,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fill used for anything without a score.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(204, 204, 204);

/// Pure white, the default low end of every domain gradient.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);

/// Errors that can occur while parsing colors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not a 6-digit hex color.
    #[error("invalid hex color '{0}': expected #rrggbb")]
    InvalidHex(String),
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the color as `#rrggbb` (lowercase, two digits per channel).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Formats the color as a CSS `rgb(r, g, b)` expression.
    #[must_use]
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Parses a hex color, falling back to [`NEUTRAL_GRAY`] if the string is
    /// malformed.
    #[must_use]
    pub fn from_hex_or_default(hex: &str) -> Self {
        hex.parse().unwrap_or_else(|e| {
            log::warn!("{e}, falling back to {}", NEUTRAL_GRAY.to_hex());
            NEUTRAL_GRAY
        })
    }

    /// Returns the channels as an array, in `[r, g, b]` order.
    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Accepts `#rrggbb` or `rrggbb`, in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_owned()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidHex(s.to_owned()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde adapter that tolerates malformed hex strings.
///
/// Use with `#[serde(with = "wri_color::lenient_hex")]` on fields that come
/// from user-edited documents. A bad color becomes [`NEUTRAL_GRAY`] instead
/// of failing the whole document.
pub mod lenient_hex {
    use serde::{Deserialize as _, Deserializer, Serializer};

    use crate::Rgb;

    /// Serializes as `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    /// Deserializes any string, falling back to gray when it does not parse.
    ///
    /// # Errors
    ///
    /// Returns an error only if the value is not a string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Rgb::from_hex_or_default(&s))
    }
}
