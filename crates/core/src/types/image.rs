//! Product image reference.

use core::fmt;

use serde::{Deserialize, Serialize, Serializer};
use url::Url;

/// Errors that can occur when parsing an [`ImageUrl`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageUrlError {
    #[error("image URL cannot be empty")]
    Empty,
    #[error("image URL is not a valid URL: {0}")]
    Invalid(String),
    #[error("image URL scheme `{0}` is not supported")]
    UnsupportedScheme(String),
}

/// An image reference: an absolute `http`/`https` URL or a `data:` URI.
///
/// The value is opaque to the showcase; it is handed to the display layer
/// as-is, which falls back to a placeholder when it cannot be loaded.
/// Deserialization goes through [`ImageUrl::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Parse and validate an image URL.
    ///
    /// The trimmed input string is kept verbatim (not normalized).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not an absolute URL, or uses a
    /// scheme other than `http`, `https` or `data`.
    pub fn parse(s: &str) -> Result<Self, ImageUrlError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ImageUrlError::Empty);
        }
        let url = Url::parse(s).map_err(|e| ImageUrlError::Invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" | "data" => Ok(Self(s.to_owned())),
            other => Err(ImageUrlError::UnsupportedScheme(other.to_owned())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageUrl {
    type Error = ImageUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for ImageUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_web_and_data_urls() {
        assert!(ImageUrl::parse("https://images.example.com/a.jpg?w=400").is_ok());
        assert!(ImageUrl::parse("http://localhost/img.png").is_ok());
        assert!(ImageUrl::parse("data:image/svg+xml;base64,PHN2Zz4=").is_ok());
    }

    #[test]
    fn test_keeps_input_verbatim() {
        let raw = "https://Images.Example.com/photo?w=400&h=300";
        assert_eq!(ImageUrl::parse(raw).map(|u| u.to_string()), Ok(raw.to_owned()));
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert_eq!(ImageUrl::parse(" "), Err(ImageUrlError::Empty));
        assert!(matches!(
            ImageUrl::parse("photo.jpg"),
            Err(ImageUrlError::Invalid(_))
        ));
        assert_eq!(
            ImageUrl::parse("javascript:alert(1)"),
            Err(ImageUrlError::UnsupportedScheme("javascript".to_owned()))
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let url: ImageUrl = serde_json::from_str("\"https://example.com/a.png\"").unwrap();
        assert_eq!(serde_json::to_string(&url).unwrap(), "\"https://example.com/a.png\"");

        assert!(serde_json::from_str::<ImageUrl>("\"javascript:alert(1)\"").is_err());
        assert!(serde_json::from_str::<ImageUrl>("\"\"").is_err());
    }
}
