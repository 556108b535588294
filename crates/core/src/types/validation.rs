//! Validation errors for raw record input.

use super::{CategoryError, EmailError, ImageUrlError, PriceError};

/// Reasons raw input cannot become a product, submission or settings draft.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or whitespace.
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
    #[error("invalid category: {0}")]
    Category(#[from] CategoryError),
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("invalid image: {0}")]
    Image(#[from] ImageUrlError),
}

/// Trimmed value of a required text field.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_owned())
}

/// Serde field deserializer that rejects a blank required text field.
pub(crate) fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <String as serde::Deserialize>::deserialize(deserializer)?;
    if value.trim().is_empty() {
        return Err(serde::de::Error::custom("required text field is blank"));
    }
    Ok(value)
}

/// Trimmed value of an optional text field; blank counts as absent.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
