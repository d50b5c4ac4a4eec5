#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// CMYK representation.
pub mod cmyk;

/// Euclidean distance between color vectors.
pub mod distance;

/// Error types for the color module.
pub mod error;

/// CIE-XYZ and CIE-Lab representations.
pub mod lab;

/// 8-bit sRGB representation and hex encoding.
pub mod rgb;

/// Color space identifiers and vectors expressed in a color space.
pub mod space;

pub use crate::cmyk::Cmyk;
pub use crate::distance::euclidean_distance;
pub use crate::error::ColorError;
pub use crate::lab::{Lab, Xyz};
pub use crate::rgb::Rgb;
pub use crate::space::{ColorSpace, ColorVector};
