//! The shared admin credential.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Password used when no credential has been stored yet.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Errors that can occur when creating an [`AdminPassword`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("admin password cannot be empty")]
    Empty,
}

/// The single shared admin password.
///
/// Stored and compared as plaintext; the wrapper only keeps the value out of
/// `Debug` output and logs.
#[derive(Clone)]
pub struct AdminPassword(SecretString);

impl AdminPassword {
    /// Create a password from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Empty`] if the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, CredentialError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(SecretString::from(value)))
    }

    /// Exact string comparison against a login attempt.
    #[must_use]
    pub fn matches(&self, attempt: &str) -> bool {
        self.0.expose_secret() == attempt
    }

    /// The raw password, for persisting.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Default for AdminPassword {
    fn default() -> Self {
        Self(SecretString::from(DEFAULT_ADMIN_PASSWORD))
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminPassword([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_password() {
        assert!(AdminPassword::default().matches(DEFAULT_ADMIN_PASSWORD));
    }

    #[test]
    fn test_matches_is_exact() {
        let password = AdminPassword::new("Hunter2").ok();
        let password = password.as_ref();
        assert_eq!(password.map(|p| p.matches("Hunter2")), Some(true));
        assert_eq!(password.map(|p| p.matches("hunter2")), Some(false));
        assert_eq!(password.map(|p| p.matches("Hunter2 ")), Some(false));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(AdminPassword::new(""), Err(CredentialError::Empty)));
    }

    #[test]
    fn test_debug_redacts() {
        let password = AdminPassword::default();
        let debug = format!("{password:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(DEFAULT_ADMIN_PASSWORD));
    }
}
