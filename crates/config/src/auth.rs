//! Credential configuration and resolution.
//!
//! Planka accepts two ways of authenticating:
//!
//! 1. An API key, sent on every request as `X-Api-Key`
//! 2. A username (or email) and password, exchanged for a bearer token
//!
//! When both are configured the API key wins, since it needs no login round
//! trip.

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Credentials as written in a configuration file.
///
/// Secrets are kept as plain strings here so the file can round-trip; they
/// are wrapped in [`SecretString`] by [`resolve_credentials`]. The `Debug`
/// output redacts them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Username or email address for password login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for password login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CredentialsConfig")
            .field("api_key", &redact(&self.api_key))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

impl CredentialsConfig {
    /// Returns whether any usable credential is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        resolve_credentials(self).is_some()
    }
}

/// Credentials ready to be used against a server.
///
/// # Examples
///
/// ```
/// use planka_config::auth::Credentials;
///
/// let creds = Credentials::api_key("key");
/// assert!(format!("{creds:?}").contains("REDACTED"));
/// ```
#[derive(Clone)]
pub enum Credentials {
    /// An API key sent as `X-Api-Key`.
    ApiKey(SecretString),
    /// A login exchanged for a bearer token.
    Password {
        /// Username or email address.
        username: String,
        /// Password.
        password: SecretString,
    },
}

impl Credentials {
    /// Creates API key credentials.
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(SecretString::from(key.into()))
    }

    /// Creates password credentials.
    #[must_use]
    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.debug_tuple("ApiKey").field(&"[REDACTED]").finish(),
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Resolves the credentials to use from configuration.
///
/// Tries the following sources in order:
///
/// 1. API key
/// 2. Username and password (both must be present and non-empty)
///
/// # Returns
///
/// Returns `Some(credentials)` if one of the sources is usable, `None`
/// otherwise.
///
/// # Examples
///
/// ```
/// use planka_config::auth::{Credentials, CredentialsConfig, resolve_credentials};
///
/// let config = CredentialsConfig {
///     api_key: Some("key".to_string()),
///     username: Some("demo".to_string()),
///     password: Some("secret".to_string()),
/// };
/// assert!(matches!(resolve_credentials(&config), Some(Credentials::ApiKey(_))));
///
/// assert!(resolve_credentials(&CredentialsConfig::default()).is_none());
/// ```
#[must_use]
pub fn resolve_credentials(config: &CredentialsConfig) -> Option<Credentials> {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    // 1. API key
    if let Some(key) = present(&config.api_key) {
        debug!("using API key credentials");
        return Some(Credentials::api_key(key));
    }

    // 2. Username and password
    match (present(&config.username), present(&config.password)) {
        (Some(username), Some(password)) => {
            debug!(username, "using password credentials");
            Some(Credentials::password(username, password))
        }
        (Some(username), None) => {
            debug!(username, "username configured without a password");
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn resolve_prefers_api_key() {
        let config = CredentialsConfig {
            api_key: Some("key".to_string()),
            username: Some("demo".to_string()),
            password: Some("secret".to_string()),
        };
        match resolve_credentials(&config) {
            Some(Credentials::ApiKey(key)) => assert_eq!(key.expose_secret(), "key"),
            other => panic!("expected API key, got {other:?}"),
        }
    }

    #[test]
    fn resolve_falls_back_to_password() {
        let config = CredentialsConfig {
            api_key: Some("  ".to_string()),
            username: Some("demo".to_string()),
            password: Some("secret".to_string()),
        };
        match resolve_credentials(&config) {
            Some(Credentials::Password { username, password }) => {
                assert_eq!(username, "demo");
                assert_eq!(password.expose_secret(), "secret");
            }
            other => panic!("expected password credentials, got {other:?}"),
        }
    }

    #[test]
    fn resolve_requires_both_username_and_password() {
        let config = CredentialsConfig {
            username: Some("demo".to_string()),
            ..Default::default()
        };
        assert!(resolve_credentials(&config).is_none());
        assert!(!config.is_configured());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = CredentialsConfig {
            api_key: Some("super-secret-key".to_string()),
            username: Some("demo".to_string()),
            password: Some("hunter2".to_string()),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("demo"));

        let creds = Credentials::password("demo", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
