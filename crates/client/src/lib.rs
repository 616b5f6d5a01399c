//! HTTP client for the Planka REST API.
//!
//! This crate talks to a Planka server: it renders routes, authenticates,
//! wraps each endpoint in a typed method, and places new or moved items
//! among their siblings.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`PlankaClient`]: The main API client, built with [`PlankaClientBuilder`]
//! - [`route`]: Route templates and the [`RouteRequest`] builder
//! - Typed endpoints (boards, lists, cards, labels, task lists, tasks,
//!   custom fields) as methods on [`PlankaClient`]
//! - Sibling-aware placement: [`PlankaClient::position_for`] and the
//!   `add_*` helpers
//! - Moves: [`PlankaClient::move_card`], [`PlankaClient::move_cards`] and
//!   friends
//! - [`Error`]: Error types for API operations
//!
//! # Authentication
//!
//! Two kinds of [`Credentials`] are supported:
//!
//! - **API key**: sent as `X-Api-Key` on every request
//! - **Username and password**: exchanged for a bearer token by
//!   [`PlankaClient::logon`]
//!
//! Secrets are held in [`secrecy::SecretString`] and never logged.
//!
//! # Examples
//!
//! ```no_run
//! use planka_client::PlankaClient;
//! use planka_config::Config;
//! use planka_protocol::Placement;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let client = PlankaClient::from_config(&config)?;
//! client.logon().await?;
//!
//! let list = client.add_list("1000", "Review", Placement::Bottom).await?;
//! let card = client.add_card(&list.id, "Write release notes", Placement::Top).await?;
//! client.move_card(&card.id, "2004", Placement::Exact(100_000)).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod moves;
pub mod placement;
pub mod route;

// Re-export primary types at crate root for convenience
pub use auth::{Terms, TermsType};
pub use client::{PlankaClient, PlankaClientBuilder, Session};
pub use endpoints::ServerInfo;
pub use error::{ApiErrorCode, Error, Result};
pub use planka_config::Credentials;
pub use route::{Route, RouteRequest};
