use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorError;

/// An 8-bit sRGB color.
///
/// This is the canonical encoding of a color: every other representation
/// (Lab, CMYK, XYZ) is derived from it on demand.
///
/// # Examples
///
/// ```
/// use swatch_color::Rgb;
///
/// let red = Rgb::from_hex("FF0000").unwrap();
///
/// assert_eq!(red, Rgb::new(255, 0, 0));
/// assert_eq!(red.to_hex(), "ff0000");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a new color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color from exactly 6 hexadecimal digits.
    ///
    /// The string must not carry a leading `#`. Both upper and lower case
    /// digits are accepted.
    ///
    /// # Arguments
    ///
    /// * `hex` - The hex string, e.g. `"1E90FF"`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidFormat`] if the string is not 6 characters
    /// long or contains a non-hex character.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidFormat(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidFormat(hex.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Encode the color as 6 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The channels as an array in R, G, B order.
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The channels widened to `f64` in the range [0, 255].
    pub fn to_array(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Build a color from floating point channels, rounding to the nearest
    /// integer and clamping into [0, 255].
    pub fn from_f64_rounded(channels: [f64; 3]) -> Self {
        let q = |c: f64| c.round().clamp(0.0, 255.0) as u8;
        Self::new(q(channels[0]), q(channels[1]), q(channels[2]))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// serialized as its hex form so seed files and rows stay human readable
impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
