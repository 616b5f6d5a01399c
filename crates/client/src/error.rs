//! Error types for Planka API operations.
//!
//! This module defines the error types that can occur while talking to a
//! Planka server: transport failures, error responses, local precondition
//! violations and authentication problems.

use std::fmt;

use planka_protocol::{Position, ProtocolError};
use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Deserialize;

/// Error codes reported by Planka in the `code` field of an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// `E_CONFLICT`: the resource already exists or is in a conflicting state.
    Conflict,
    /// `E_FORBIDDEN`: the current user may not perform the action.
    Forbidden,
    /// `E_NOT_FOUND`: the resource does not exist or is not visible.
    NotFound,
    /// `E_UNAUTHORIZED`: missing or invalid credentials.
    Unauthorized,
    /// `E_UNPROCESSABLE_ENTITY`: the request is well-formed but rejected.
    UnprocessableEntity,
    /// `E_MISSING_OR_INVALID_PARAMS`: request validation failed.
    MissingOrInvalidParams,
}

impl ApiErrorCode {
    /// Parses a Planka error code, returning `None` for unknown codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_client::ApiErrorCode;
    ///
    /// assert_eq!(ApiErrorCode::from_code("E_NOT_FOUND"), Some(ApiErrorCode::NotFound));
    /// assert_eq!(ApiErrorCode::from_code("E_TEAPOT"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E_CONFLICT" => Some(Self::Conflict),
            "E_FORBIDDEN" => Some(Self::Forbidden),
            "E_NOT_FOUND" => Some(Self::NotFound),
            "E_UNAUTHORIZED" => Some(Self::Unauthorized),
            "E_UNPROCESSABLE_ENTITY" => Some(Self::UnprocessableEntity),
            "E_MISSING_OR_INVALID_PARAMS" => Some(Self::MissingOrInvalidParams),
            _ => None,
        }
    }

    /// Returns the wire form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "E_CONFLICT",
            Self::Forbidden => "E_FORBIDDEN",
            Self::NotFound => "E_NOT_FOUND",
            Self::Unauthorized => "E_UNAUTHORIZED",
            Self::UnprocessableEntity => "E_UNPROCESSABLE_ENTITY",
            Self::MissingOrInvalidParams => "E_MISSING_OR_INVALID_PARAMS",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during Planka API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Planka API error ({status}){}: {message}", format_code(*.code))]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// Planka error code, when the server sent a known one.
        code: Option<ApiErrorCode>,
        /// Human-readable message from the server, or the raw body.
        message: String,
        /// Validation problems listed by the server.
        problems: Vec<String>,
    },

    /// A local precondition was violated before any request was sent.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A route template references a parameter that was not supplied.
    #[error("missing value for path parameter {name:?} in route {template}")]
    MissingPathParam {
        /// The placeholder name.
        name: String,
        /// The route template.
        template: &'static str,
    },

    /// The configured server URL cannot be used as a base URL.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The URL that was rejected.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// `logon` was called without any configured credentials.
    #[error("no credentials configured: provide an API key or a username and password")]
    MissingCredentials,

    /// The user must accept the terms of service before a token is issued.
    ///
    /// Pass the pending token to `PlankaClient::accept_terms`.
    #[error("terms of service must be accepted before logging on")]
    TermsAcceptanceRequired {
        /// Short-lived token identifying the pending login.
        pending_token: SecretString,
    },

    /// A card cannot be restored because it does not remember a previous list.
    #[error("card {card_id} has no previous list to restore to")]
    NotRestorable {
        /// The card that was asked to be restored.
        card_id: String,
    },

    /// A block of cards does not fit between its placement and the next
    /// card of the target list.
    #[error("no room for {count} cards between positions {after} and {before}")]
    NoRoom {
        /// Number of cards to place.
        count: usize,
        /// Position of the first card of the block.
        after: Position,
        /// Position of the next card already in the target list.
        before: Position,
    },

    /// A spawned request task panicked or was cancelled.
    #[error("background request failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

fn format_code(code: Option<ApiErrorCode>) -> String {
    code.map(|code| format!(" {code}")).unwrap_or_default()
}

impl Error {
    /// Returns the HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Returns the Planka error code for API errors.
    #[must_use]
    pub fn api_code(&self) -> Option<ApiErrorCode> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
            || self.api_code() == Some(ApiErrorCode::NotFound)
    }
}

/// The JSON body Planka sends with error responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    problems: Vec<serde_json::Value>,
    #[serde(default)]
    pending_token: Option<String>,
}

/// Builds the error for a non-success response from its status and body.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> Error {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    if let Some(pending_token) = parsed.pending_token {
        return Error::TermsAcceptanceRequired {
            pending_token: SecretString::from(pending_token),
        };
    }

    let message = parsed
        .message
        .or_else(|| status.canonical_reason().map(str::to_string).filter(|_| body.is_empty()))
        .unwrap_or_else(|| body.trim().to_string());
    let problems = parsed
        .problems
        .into_iter()
        .map(|problem| match problem {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .collect();

    Error::Api {
        status,
        code: parsed.code.as_deref().and_then(ApiErrorCode::from_code),
        message,
        problems,
    }
}

/// A specialized Result type for Planka API operations.
pub type Result<T> = std::result::Result<T, Error>;
