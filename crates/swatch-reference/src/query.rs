use serde::{Deserialize, Serialize};
use swatch_color::{ColorError, Rgb};

use crate::error::ReferenceError;

/// A request to resolve a single color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorQuery {
    /// An explicit channel triple.
    Rgb([u8; 3]),
    /// A hex code, validated when the query is resolved.
    Hex(String),
}

impl ColorQuery {
    /// Build a query from loosely typed request parameters.
    ///
    /// A hex code takes precedence over channel values. Without a hex code
    /// all three channels must be present and within [0, 255].
    ///
    /// # Arguments
    ///
    /// * `hex` - Optional hex code, 6 digits without a leading `#`.
    /// * `r`, `g`, `b` - Optional channel values.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::MissingComponents`] when neither a hex code
    /// nor a full triple is given, and [`ReferenceError::ChannelOutOfRange`]
    /// for a channel outside [0, 255].
    pub fn from_params(
        hex: Option<&str>,
        r: Option<i64>,
        g: Option<i64>,
        b: Option<i64>,
    ) -> Result<Self, ReferenceError> {
        if let Some(hex) = hex {
            return Ok(ColorQuery::Hex(hex.to_string()));
        }

        let (Some(r), Some(g), Some(b)) = (r, g, b) else {
            return Err(ReferenceError::MissingComponents);
        };

        let channel =
            |v: i64| u8::try_from(v).map_err(|_| ReferenceError::ChannelOutOfRange(v));

        Ok(ColorQuery::Rgb([channel(r)?, channel(g)?, channel(b)?]))
    }

    /// The requested color.
    ///
    /// # Errors
    ///
    /// Fails with an invalid format error for a malformed hex code.
    pub fn to_rgb(&self) -> Result<Rgb, ColorError> {
        match self {
            ColorQuery::Rgb(channels) => Ok(Rgb::from(*channels)),
            ColorQuery::Hex(hex) => Rgb::from_hex(hex),
        }
    }
}

impl From<Rgb> for ColorQuery {
    fn from(color: Rgb) -> Self {
        ColorQuery::Rgb(color.channels())
    }
}

/// The body returned to a client whose request failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human readable description.
    pub error: String,
}

impl From<&ReferenceError> for ErrorBody {
    fn from(err: &ReferenceError) -> Self {
        let error = match err {
            ReferenceError::Color(ColorError::InvalidFormat(_)) => {
                "Invalid hex color code".to_string()
            }
            other => other.to_string(),
        };
        ErrorBody { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_from_hex() -> Result<(), ReferenceError> {
        let query = ColorQuery::from_params(Some("ff0000"), None, Some(7), None)?;
        assert_eq!(query, ColorQuery::Hex("ff0000".to_string()));
        assert_eq!(query.to_rgb()?, Rgb::new(255, 0, 0));
        Ok(())
    }

    #[test]
    fn query_from_channels() -> Result<(), ReferenceError> {
        let query = ColorQuery::from_params(None, Some(0), Some(128), Some(255))?;
        assert_eq!(query, ColorQuery::Rgb([0, 128, 255]));
        assert_eq!(query.to_rgb()?, Rgb::new(0, 128, 255));
        Ok(())
    }

    #[test]
    fn query_missing_channel() {
        let res = ColorQuery::from_params(None, Some(1), None, Some(3));
        let err = res.expect_err("missing channel must fail");
        assert!(matches!(err, ReferenceError::MissingComponents));
        assert_eq!(
            ErrorBody::from(&err).error,
            "Please provide r, g and b values"
        );
    }

    #[test]
    fn query_channel_out_of_range() {
        let res = ColorQuery::from_params(None, Some(0), Some(256), Some(0));
        assert!(matches!(res, Err(ReferenceError::ChannelOutOfRange(256))));

        let res = ColorQuery::from_params(None, Some(-1), Some(0), Some(0));
        assert!(matches!(res, Err(ReferenceError::ChannelOutOfRange(-1))));
    }

    #[test]
    fn invalid_hex_body() -> Result<(), ReferenceError> {
        let query = ColorQuery::from_params(Some("#12345"), None, None, None)?;
        let err = ReferenceError::from(query.to_rgb().expect_err("bad hex must fail"));

        let body = ErrorBody::from(&err);
        assert_eq!(body.error, "Invalid hex color code");
        assert_eq!(
            serde_json::to_string(&body)?,
            r#"{"error":"Invalid hex color code"}"#
        );
        Ok(())
    }
}
