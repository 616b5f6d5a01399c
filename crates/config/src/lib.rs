//! Configuration management for the Planka client.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`server`]: Server URL, timeout and language
//! - [`gap`]: Position gap setting with flexible parsing
//! - [`auth`]: Credential configuration and resolution
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Environment variables (`PLANKA_URL`, `PLANKA_API_KEY`,
//!    `PLANKA_USERNAME`, `PLANKA_PASSWORD`, `PLANKA_LANG`, `PLANKA_TIMEOUT`,
//!    `PLANKA_POSITION_GAP`)
//! 2. Local config (`./planka.json5` or `./planka.json`)
//! 3. User config (`~/.config/planka/config.json5` or `~/.config/planka/config.json`)
//! 4. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   server: { url: "https://planka.example.com", timeout_secs: 30 },
//!   // An API key wins over username and password
//!   credentials: { api_key: "..." },
//!   // "current" (65536), "legacy" (65535) or any positive integer
//!   position_gap: "current",
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use planka_config::Config;
//!
//! # fn example() -> planka_config::Result<()> {
//! let config = Config::load()?;
//!
//! if config.resolved_credentials().is_none() {
//!     println!("no credentials configured");
//! }
//! println!("new items are spaced by {}", config.gap());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gap;
pub mod persistence;
pub mod server;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, CredentialsConfig};
pub use config::Config;
pub use error::{ConfigError, Result};
pub use gap::GapSetting;
pub use server::ServerConfig;
