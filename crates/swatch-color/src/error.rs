use crate::space::ColorSpace;

/// An error type for the color module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// The color literal is not a valid encoding.
    #[error("Invalid color format: {0}")]
    InvalidFormat(String),

    /// The color space identifier is not one of `rgb`, `lab` or `cmyk`.
    #[error("Unknown color space: {0}")]
    UnknownColorSpace(String),

    /// Two vectors from different color spaces were compared.
    #[error("Cannot compare a {0} vector with a {1} vector")]
    SpaceMismatch(ColorSpace, ColorSpace),
}
