#![deny(missing_docs)]
//! Image types and traits for holding decoded pixel data

/// Image representation for color analysis.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
