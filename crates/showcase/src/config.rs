//! Showcase configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOWCASE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOWCASE_PORT` - Listen port (default: 3000)
//! - `SHOWCASE_BASE_URL` - Public URL (default: <http://localhost:3000>);
//!   an `https` URL turns on secure session cookies
//! - `SHOWCASE_DATA_DIR` - Directory holding the stored records (default: data)
//! - `SHOWCASE_STORAGE_QUOTA_BYTES` - Store quota in bytes (default: 5242880)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::store::DEFAULT_QUOTA_BYTES;

/// Data directory used when `SHOWCASE_DATA_DIR` is unset.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Showcase application configuration.
#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: Url,
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Store quota in bytes
    pub storage_quota: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl ShowcaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = parse_or(
            get("SHOWCASE_HOST"),
            "SHOWCASE_HOST",
            IpAddr::from([127, 0, 0, 1]),
        )?;
        let port = parse_or(get("SHOWCASE_PORT"), "SHOWCASE_PORT", 3000_u16)?;
        let base_url = get("SHOWCASE_BASE_URL")
            .as_deref()
            .unwrap_or("http://localhost:3000")
            .parse::<Url>()
            .map_err(|e| invalid("SHOWCASE_BASE_URL", &e))?;
        let data_dir = get("SHOWCASE_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let storage_quota = parse_or(
            get("SHOWCASE_STORAGE_QUOTA_BYTES"),
            "SHOWCASE_STORAGE_QUOTA_BYTES",
            DEFAULT_QUOTA_BYTES,
        )?;

        let sentry_sample_rate =
            parse_rate(get("SENTRY_SAMPLE_RATE"), "SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate(
            get("SENTRY_TRACES_SAMPLE_RATE"),
            "SENTRY_TRACES_SAMPLE_RATE",
            0.0,
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            storage_quota,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: &dyn std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse an optional value, falling back to `default` when unset.
fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim().parse::<T>().map_err(|e| invalid(key, &e))
    })
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(value: Option<String>, key: &str, default: f32) -> Result<f32, ConfigError> {
    let rate = parse_or(value, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid(key, &format!("{rate} is outside 0.0..=1.0")))
    }
}
