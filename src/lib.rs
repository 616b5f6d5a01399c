//! A typed client SDK for the Planka kanban board REST API.
//!
//! This crate bundles the workspace members under one roof:
//!
//! - [`protocol`]: resource models, request payloads and the position engine
//! - [`config`]: configuration files, environment overrides and credentials
//! - [`client`]: the HTTP client, placement and moves
//!
//! # Examples
//!
//! ```no_run
//! use planka::{Placement, PlankaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = planka::Config::load()?;
//! let client = PlankaClient::from_config(&config)?;
//! client.logon().await?;
//!
//! for project in client.projects().await? {
//!     println!("{}", project.name);
//! }
//! client.add_card("2002", "Triage inbox", Placement::Bottom).await?;
//! # Ok(())
//! # }
//! ```

pub use planka_client as client;
pub use planka_config as config;
pub use planka_protocol as protocol;

pub use planka_client::{Credentials, Error, PlankaClient, PlankaClientBuilder, Result};
pub use planka_config::Config;
pub use planka_protocol::{Parent, Placement, Position, PositionGap, SiblingKind};
