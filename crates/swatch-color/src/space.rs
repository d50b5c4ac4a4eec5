use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::euclidean_distance;
use crate::error::ColorError;
use crate::rgb::Rgb;

/// The color spaces supported for distance computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// 8-bit sRGB channels in [0, 255].
    Rgb,
    /// CIE-Lab with a D65 reference white.
    Lab,
    /// CMYK with channels in [0, 1].
    Cmyk,
}

impl ColorSpace {
    /// All supported color spaces.
    pub const ALL: [ColorSpace; 3] = [ColorSpace::Rgb, ColorSpace::Lab, ColorSpace::Cmyk];

    /// The lowercase identifier of the color space.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Lab => "lab",
            ColorSpace::Cmyk => "cmyk",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "lab" => Ok(ColorSpace::Lab),
            "cmyk" => Ok(ColorSpace::Cmyk),
            _ => Err(ColorError::UnknownColorSpace(s.to_string())),
        }
    }
}

/// A color expressed as a numeric vector in one color space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorVector {
    /// R, G, B in [0, 255].
    Rgb([f64; 3]),
    /// L, a, b.
    Lab([f64; 3]),
    /// C, M, Y, K in [0, 1].
    Cmyk([f64; 4]),
}

impl ColorVector {
    /// The color space the vector lives in.
    pub fn space(&self) -> ColorSpace {
        match self {
            ColorVector::Rgb(_) => ColorSpace::Rgb,
            ColorVector::Lab(_) => ColorSpace::Lab,
            ColorVector::Cmyk(_) => ColorSpace::Cmyk,
        }
    }

    /// The raw channel values.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            ColorVector::Rgb(v) | ColorVector::Lab(v) => v.as_slice(),
            ColorVector::Cmyk(v) => v.as_slice(),
        }
    }

    /// Euclidean distance to another vector of the same color space.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::SpaceMismatch`] if the two vectors belong to
    /// different color spaces.
    pub fn distance(&self, other: &ColorVector) -> Result<f64, ColorError> {
        match (self, other) {
            (ColorVector::Rgb(a), ColorVector::Rgb(b)) => Ok(euclidean_distance(a, b)),
            (ColorVector::Lab(a), ColorVector::Lab(b)) => Ok(euclidean_distance(a, b)),
            (ColorVector::Cmyk(a), ColorVector::Cmyk(b)) => Ok(euclidean_distance(a, b)),
            _ => Err(ColorError::SpaceMismatch(self.space(), other.space())),
        }
    }
}

impl Rgb {
    /// Express the color in the given color space.
    ///
    /// # Example
    ///
    /// ```
    /// use swatch_color::{ColorSpace, ColorVector, Rgb};
    ///
    /// let v = Rgb::new(255, 0, 0).to_space(ColorSpace::Cmyk);
    /// assert_eq!(v, ColorVector::Cmyk([0.0, 1.0, 1.0, 0.0]));
    /// ```
    pub fn to_space(&self, space: ColorSpace) -> ColorVector {
        match space {
            ColorSpace::Rgb => ColorVector::Rgb(self.to_array()),
            ColorSpace::Lab => ColorVector::Lab(self.to_lab().to_array()),
            ColorSpace::Cmyk => ColorVector::Cmyk(self.to_cmyk().to_array()),
        }
    }

    /// Distance between two colors measured in the given color space.
    pub fn distance_in(&self, other: &Rgb, space: ColorSpace) -> f64 {
        match space {
            ColorSpace::Rgb => euclidean_distance(&self.to_array(), &other.to_array()),
            ColorSpace::Lab => {
                euclidean_distance(&self.to_lab().to_array(), &other.to_lab().to_array())
            }
            ColorSpace::Cmyk => {
                euclidean_distance(&self.to_cmyk().to_array(), &other.to_cmyk().to_array())
            }
        }
    }
}
