//! Session-related types.
//!
//! The admin gate is a two-state machine kept in the visitor's session. It
//! starts out [`AdminSession::Anonymous`] on every new session and is never
//! persisted beyond it.

use m5_core::AdminPassword;
use serde::{Deserialize, Serialize};

/// Errors from the admin gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid admin password")]
    InvalidPassword,
}

/// Whether the current session may use the admin panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminSession {
    #[default]
    Anonymous,
    Authenticated,
}

impl AdminSession {
    /// Check `attempt` against the stored credential.
    ///
    /// The receiver is not changed: on a mismatch the caller keeps whatever
    /// state it had, so an already authenticated session stays
    /// authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidPassword`] on mismatch.
    pub fn login(self, credential: &AdminPassword, attempt: &str) -> Result<Self, AuthError> {
        if credential.matches(attempt) {
            Ok(Self::Authenticated)
        } else {
            Err(AuthError::InvalidPassword)
        }
    }

    #[must_use]
    pub const fn logout(self) -> Self {
        Self::Anonymous
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Session keys.
pub mod keys {
    /// Key for the [`AdminSession`](super::AdminSession) state.
    pub const ADMIN: &str = "admin";

    /// Key for the one-shot [`Notice`](crate::models::Notice).
    pub const NOTICE: &str = "notice";
}
