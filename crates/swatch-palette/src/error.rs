use swatch_image::ImageError;
use swatch_reference::ReferenceError;

/// An error type for the palette module.
#[derive(thiserror::Error, Debug)]
pub enum PaletteError {
    /// The image does not hold enough usable pixels for the request.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// The extraction parameters are invalid.
    #[error("Invalid palette configuration: {0}")]
    InvalidConfig(String),

    /// The extraction was cancelled by the caller.
    #[error("Palette extraction was cancelled")]
    Cancelled,

    /// Error to create an image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error to downscale the image.
    #[error("Failed to resize the image. {0}")]
    Resize(String),

    /// Error to name a palette color.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}
