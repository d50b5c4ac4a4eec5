use swatch_color::{ColorError, ColorSpace};

/// An error type for the reference module.
#[derive(thiserror::Error, Debug)]
pub enum ReferenceError {
    /// The reference configuration cannot produce a hierarchy.
    #[error("Invalid reference configuration: {0}")]
    Configuration(String),

    /// No hierarchy has been built for the requested color space.
    #[error("No reference data for the {0} color space")]
    NoReferenceData(ColorSpace),

    /// A leaf color could not be bound to a known parent.
    #[error("Leaf color '{leaf}' has no known parent (looked up '{parent}')")]
    UnresolvedEntry {
        /// Name of the leaf color.
        leaf: String,
        /// Identifier that failed to resolve.
        parent: String,
    },

    /// The request carries neither a hex code nor a full r, g, b triple.
    #[error("Please provide r, g and b values")]
    MissingComponents,

    /// A channel of the requested color is outside [0, 255].
    #[error("Color channel value {0} is outside [0, 255]")]
    ChannelOutOfRange(i64),

    /// Error raised by a color conversion.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Error to parse or write JSON data.
    #[error("Failed to process JSON data. {0}")]
    Json(#[from] serde_json::Error),
}
