//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates the
//! server connection, credentials and position gap settings.

use std::path::Path;

use planka_protocol::PositionGap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{Credentials, CredentialsConfig, resolve_credentials};
use crate::error::{ConfigError, Result};
use crate::gap::GapSetting;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::server::ServerConfig;

/// Environment variable overriding [`ServerConfig::url`].
pub const ENV_URL: &str = "PLANKA_URL";
/// Environment variable overriding [`CredentialsConfig::api_key`].
pub const ENV_API_KEY: &str = "PLANKA_API_KEY";
/// Environment variable overriding [`CredentialsConfig::username`].
pub const ENV_USERNAME: &str = "PLANKA_USERNAME";
/// Environment variable overriding [`CredentialsConfig::password`].
pub const ENV_PASSWORD: &str = "PLANKA_PASSWORD";
/// Environment variable overriding [`ServerConfig::language`].
pub const ENV_LANGUAGE: &str = "PLANKA_LANG";
/// Environment variable overriding [`ServerConfig::timeout_secs`].
pub const ENV_TIMEOUT: &str = "PLANKA_TIMEOUT";
/// Environment variable overriding [`Config::position_gap`].
pub const ENV_POSITION_GAP: &str = "PLANKA_POSITION_GAP";

/// The main configuration struct for the Planka client.
///
/// # Examples
///
/// ```
/// use planka_config::{Config, GapSetting, ServerConfig};
///
/// // Create a default config
/// let config = Config::default();
/// assert_eq!(config.position_gap, GapSetting::Current);
///
/// // Create a custom config
/// let config = Config {
///     server: ServerConfig::with_url("https://planka.example.com"),
///     position_gap: GapSetting::Legacy,
///     ..Default::default()
/// };
/// assert_eq!(config.gap().get(), 65_535);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Credentials used to log on.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Distance between adjacent positions when appending items.
    #[serde(default)]
    pub position_gap: GapSetting,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations and the
    /// environment.
    ///
    /// Sources, highest priority first:
    ///
    /// 1. Environment variables (`PLANKA_*`)
    /// 2. Local: `./planka.json5` or `./planka.json`
    /// 3. User: `~/.config/planka/config.json5` or `~/.config/planka/config.json`
    /// 4. Built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read
    /// or parsed, if an environment variable holds an unusable value, or if
    /// the merged configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use planka_config::Config;
    ///
    /// # fn example() -> planka_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Talking to {}", config.server.url);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, without environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configuration fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use planka_config::Config;
    ///
    /// # fn example() -> planka_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Overrides settings with values returned by `lookup`, which maps an
    /// environment variable name to its value.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `PLANKA_TIMEOUT` is not an integer or
    /// `PLANKA_POSITION_GAP` is not a valid gap setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_config::{Config, GapSetting};
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_env_with(|name| match name {
    ///         "PLANKA_URL" => Some("https://planka.example.com".to_string()),
    ///         "PLANKA_POSITION_GAP" => Some("legacy".to_string()),
    ///         _ => None,
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(config.server.url, "https://planka.example.com");
    /// assert_eq!(config.position_gap, GapSetting::Legacy);
    /// ```
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = var(ENV_URL) {
            debug!(url = %url, "server url from environment");
            self.server.url = url;
        }
        if let Some(language) = var(ENV_LANGUAGE) {
            self.server.language = Some(language);
        }
        if let Some(timeout) = var(ENV_TIMEOUT) {
            let secs = timeout.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT,
                reason: format!("expected a number of seconds, got {timeout:?}"),
            })?;
            self.server.timeout_secs = secs;
        }
        if let Some(key) = var(ENV_API_KEY) {
            debug!("API key from environment");
            self.credentials.api_key = Some(key);
        }
        if let Some(username) = var(ENV_USERNAME) {
            self.credentials.username = Some(username);
        }
        if let Some(password) = var(ENV_PASSWORD) {
            self.credentials.password = Some(password);
        }
        if let Some(gap) = var(ENV_POSITION_GAP) {
            self.position_gap = gap.parse().map_err(|err: ConfigError| ConfigError::InvalidEnv {
                name: ENV_POSITION_GAP,
                reason: err.to_string(),
            })?;
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the server settings are invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_config::{Config, ServerConfig};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.server = ServerConfig::with_url("localhost:3000");
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        if self.credentials.username.is_some() && self.credentials.password.is_none() {
            warn!("username configured without a password; it will be ignored");
        }
        Ok(())
    }

    /// Returns the credentials to log on with, if any are configured.
    #[must_use]
    pub fn resolved_credentials(&self) -> Option<Credentials> {
        resolve_credentials(&self.credentials)
    }

    /// Returns the configured position gap.
    #[must_use]
    pub fn gap(&self) -> PositionGap {
        self.position_gap.resolve()
    }
}
