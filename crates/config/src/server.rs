//! Server connection configuration.
//!
//! This module provides the [`ServerConfig`] type: where the Planka server
//! lives, how long to wait for it, and which language to request terms in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default server URL, matching a local Planka instance.
pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum allowed request timeout (1 second).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed request timeout (5 minutes).
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Configuration for the server connection.
///
/// # Examples
///
/// ```
/// use planka_config::ServerConfig;
///
/// let server = ServerConfig::default();
/// assert_eq!(server.url, "http://localhost:3000");
/// assert_eq!(server.timeout().as_secs(), 30);
///
/// let server = ServerConfig::with_url("https://planka.example.com");
/// assert!(server.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the Planka server, without the `api/` suffix.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Language code used when fetching terms of service (for example `en-US`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: None,
        }
    }
}

impl ServerConfig {
    /// Creates a server configuration for the given URL with default
    /// timeout and no language preference.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the URL with exactly one trailing slash, ready to have
    /// `api/...` paths appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_config::ServerConfig;
    ///
    /// let server = ServerConfig::with_url("https://planka.example.com//");
    /// assert_eq!(server.base_url(), "https://planka.example.com/");
    /// ```
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}/", self.url.trim().trim_end_matches('/'))
    }

    /// Validates the server configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL with a
    /// host, or if the timeout is outside the allowed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_config::ServerConfig;
    ///
    /// assert!(ServerConfig::with_url("planka.local").validate().is_err());
    ///
    /// let mut server = ServerConfig::default();
    /// server.timeout_secs = 0;
    /// assert!(server.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: "scheme must be http or https".to_string(),
            })?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return Err(ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: "missing host".to_string(),
            });
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                reason: format!(
                    "timeout {} is below minimum of {} seconds",
                    self.timeout_secs, MIN_TIMEOUT_SECS
                ),
            });
        }

        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                reason: format!(
                    "timeout {} exceeds maximum of {} seconds",
                    self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }
}
