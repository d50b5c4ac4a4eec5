#![deny(missing_docs)]
//! Image decoding utilities

/// Error types for the io module.
pub mod error;

/// Functions to decode images from memory or files.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{decode_image, read_image_any, GenericImage};
