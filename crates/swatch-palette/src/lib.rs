#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Palette extraction parameters.
pub mod config;

/// Error types for the palette module.
pub mod error;

/// Weighted k-means clustering.
pub mod kmeans;

/// Palette extraction and naming.
pub mod palette;

/// Pixel filtering, downscaling and counting.
pub mod preprocess;

pub use crate::config::{KMeansConfig, PaletteConfig};
pub use crate::error::PaletteError;
pub use crate::palette::{extract_palette, extract_palette_with_cancel, name_palette, PaletteEntry};
pub use crate::preprocess::{ColorHistogram, PixelSource};
