//! Planka API client implementation.
//!
//! This module provides the [`PlankaClient`] struct, its builder, and the
//! [`Session`] it carries: the server base URL plus the current
//! authentication state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use planka_config::{Config, Credentials};
use planka_protocol::PositionGap;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result, error_from_response};
use crate::route::RouteRequest;

/// Header carrying an API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests are currently authorized.
#[derive(Clone)]
pub(crate) enum Auth {
    /// `X-Api-Key: <key>`.
    ApiKey(SecretString),
    /// `Authorization: Bearer <token>`, obtained by logging on.
    Bearer(SecretString),
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey([REDACTED])"),
            Self::Bearer(_) => f.write_str("Bearer([REDACTED])"),
        }
    }
}

/// Connection state shared by every clone of a [`PlankaClient`].
#[derive(Debug)]
pub struct Session {
    base_url: Url,
    auth: RwLock<Option<Auth>>,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) language: Option<String>,
}

impl Session {
    /// Returns the server base URL. It always ends with `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the preferred language for localized content.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub(crate) async fn set_auth(&self, auth: Option<Auth>) {
        *self.auth.write().await = auth;
    }

    pub(crate) async fn auth(&self) -> Option<Auth> {
        self.auth.read().await.clone()
    }

    async fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &*self.auth.read().await {
            Some(Auth::ApiKey(key)) => request.header(API_KEY_HEADER, key.expose_secret()),
            Some(Auth::Bearer(token)) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

/// Planka API client.
///
/// Cloning is cheap: clones share the connection pool and the session, so a
/// token obtained by [`logon`](Self::logon) on one clone is used by all.
///
/// # Examples
///
/// ```no_run
/// use planka_client::{Credentials, PlankaClient};
///
/// # async fn example() -> planka_client::Result<()> {
/// let client = PlankaClient::builder("https://planka.example.com")
///     .credentials(Credentials::password("demo", "demo"))
///     .build()?;
///
/// let me = client.logon().await?;
/// println!("logged on as {}", me.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PlankaClient {
    http: reqwest::Client,
    pub(crate) session: Arc<Session>,
    pub(crate) gap: PositionGap,
}

impl PlankaClient {
    /// Starts building a client for the server at `url`.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> PlankaClientBuilder {
        PlankaClientBuilder::new(url)
    }

    /// Builds a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`PlankaClientBuilder::build`].
    pub fn from_config(config: &Config) -> Result<Self> {
        PlankaClientBuilder::from_config(config).build()
    }

    /// Returns the session shared by this client and its clones.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the gap used for new positions.
    #[must_use]
    pub fn gap(&self) -> PositionGap {
        self.gap
    }

    /// Sends a request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for non-success responses and [`Error::Http`]
    /// if the request fails or the body does not match `T`.
    #[instrument(skip(self, request), fields(route = %request.route()))]
    pub async fn send<T: DeserializeOwned>(&self, request: RouteRequest) -> Result<T> {
        let response = self.execute(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends a request and returns the raw response once its status is
    /// known to be a success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPathParam`] before sending if the route cannot
    /// be rendered, [`Error::Api`] for non-success responses, and
    /// [`Error::Http`] for transport failures.
    pub async fn execute(&self, request: RouteRequest) -> Result<reqwest::Response> {
        let path = request.render_path()?;
        let url = self
            .session
            .base_url
            .join(&path)
            .map_err(|err| Error::InvalidBaseUrl {
                url: self.session.base_url.to_string(),
                reason: err.to_string(),
            })?;
        let method = request.route().method.clone();
        debug!(%method, %url, "sending request");

        let mut builder = self.http.request(method, url);
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        let builder = self.session.authorize(builder).await;

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = error_from_response(status, &body);
        warn!(%status, error = %err, "request failed");
        Err(err)
    }
}

/// Builder for [`PlankaClient`].
#[derive(Debug, Clone)]
pub struct PlankaClientBuilder {
    url: String,
    timeout: Duration,
    gap: PositionGap,
    credentials: Option<Credentials>,
    language: Option<String>,
}

impl PlankaClientBuilder {
    /// Creates a builder for the server at `url` with default settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            gap: PositionGap::default(),
            credentials: None,
            language: None,
        }
    }

    /// Creates a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new(config.server.base_url())
            .timeout(config.server.timeout())
            .gap(config.gap());
        builder.credentials = config.resolved_credentials();
        builder.language = config.server.language.clone();
        builder
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the gap used for new positions.
    #[must_use]
    pub fn gap(mut self, gap: PositionGap) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the credentials used by [`PlankaClient::logon`].
    ///
    /// An API key is installed immediately; a password login happens on
    /// `logon`.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the preferred language, such as `en-US`.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if the URL is not an absolute http
    /// or https URL, and [`Error::Http`] if the HTTP client cannot be
    /// initialized.
    #[instrument(skip(self), fields(url = %self.url))]
    pub fn build(self) -> Result<PlankaClient> {
        let base_url = parse_base_url(&self.url)?;
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;

        let auth = match &self.credentials {
            Some(Credentials::ApiKey(key)) => {
                debug!("authorizing with API key");
                Some(Auth::ApiKey(key.clone()))
            }
            Some(Credentials::Password { .. }) => {
                debug!("password credentials configured, logon required");
                None
            }
            None => {
                debug!("creating unauthenticated client");
                None
            }
        };

        Ok(PlankaClient {
            http,
            session: Arc::new(Session {
                base_url,
                auth: RwLock::new(auth),
                credentials: self.credentials,
                language: self.language,
            }),
            gap: self.gap,
        })
    }
}

/// Parses a server URL, normalizing it to end with exactly one `/` so that
/// relative route paths join below it.
fn parse_base_url(url: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
        url: url.to_string(),
        reason,
    };

    let normalized = format!("{}/", url.trim().trim_end_matches('/'));
    let parsed = Url::parse(&normalized).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if parsed.cannot_be_a_base() {
        return Err(invalid("not a base url".to_string()));
    }
    Ok(parsed)
}
