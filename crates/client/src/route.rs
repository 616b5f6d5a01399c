//! Request routing: route templates, path rendering and request building.
//!
//! Every endpoint is a [`Route`]: an HTTP method plus a path template such
//! as `api/boards/{id}`. Rendering a route substitutes its placeholders with
//! percent-encoded values.
//!
//! # Examples
//!
//! ```
//! use planka_client::route::routes;
//!
//! let path = routes::GET_BOARD.path(&[("id", "42")]).unwrap();
//! assert_eq!(path, "api/boards/42");
//!
//! // Values are encoded as single path segments
//! let path = routes::GET_TERMS.path(&[("type", "general/../x")]).unwrap();
//! assert_eq!(path, "api/terms/general%2F..%2Fx");
//! ```

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use serde::Serialize;

use crate::error::{Error, Result};

/// Characters escaped in a path segment: everything but RFC 3986 unreserved
/// characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// An endpoint: HTTP method and path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the server root, with `{name}` placeholders.
    pub template: &'static str,
}

impl Route {
    /// Creates a route.
    #[must_use]
    pub const fn new(method: Method, template: &'static str) -> Self {
        Self { method, template }
    }

    /// Returns the placeholder names of the template, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use planka_client::route::routes;
    ///
    /// assert_eq!(routes::CREATE_CARD.placeholders(), ["listId"]);
    /// assert!(routes::GET_PROJECTS.placeholders().is_empty());
    /// ```
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template;
        while let Some((name, after)) = next_placeholder(rest) {
            names.push(name);
            rest = after;
        }
        names
    }

    /// Renders the path, substituting every placeholder with its
    /// percent-encoded value from `params`.
    ///
    /// Values for names the template does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPathParam`] if a placeholder has no value.
    pub fn path(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            let Some((name, after)) = next_placeholder(rest) else {
                break;
            };
            out.push_str(&rest[..start]);

            let value = params
                .iter()
                .find_map(|(key, value)| (*key == name).then_some(*value))
                .ok_or_else(|| Error::MissingPathParam {
                    name: name.to_string(),
                    template: self.template,
                })?;
            out.extend(utf8_percent_encode(value, PATH_SEGMENT));
            rest = after;
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Starts building a request for this route.
    #[must_use]
    pub fn request(&self) -> RouteRequest {
        RouteRequest::new(self.clone())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

/// Splits off the first `{name}` placeholder, returning the name and the
/// remainder after the closing brace.
fn next_placeholder(template: &'static str) -> Option<(&'static str, &'static str)> {
    let start = template.find('{')?;
    let after_open = &template[start + 1..];
    let end = after_open.find('}')?;
    Some((&after_open[..end], &after_open[end + 1..]))
}

/// A request under construction: route, path parameters, query string and
/// optional JSON body.
///
/// # Examples
///
/// ```
/// use planka_client::route::routes;
/// use planka_protocol::payload::Reposition;
///
/// let request = routes::UPDATE_LABEL
///     .request()
///     .param("id", "7")
///     .json(&Reposition { position: 0 })
///     .unwrap();
/// assert_eq!(request.render_path().unwrap(), "api/labels/7");
/// assert_eq!(request.body().unwrap()["position"], 0);
/// ```
#[derive(Debug, Clone)]
pub struct RouteRequest {
    route: Route,
    params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
}

impl RouteRequest {
    /// Creates an empty request for `route`.
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            route,
            params: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Appends a query string pair.
    #[must_use]
    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Sets the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Returns the route.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the query pairs.
    #[must_use]
    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Renders the path from the collected parameters.
    ///
    /// # Errors
    ///
    /// See [`Route::path`].
    pub fn render_path(&self) -> Result<String> {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        self.route.path(&params)
    }
}

/// The catalogue of Planka endpoints used by the client.
pub mod routes {
    use reqwest::Method;

    use super::Route;

    // Authentication
    pub const CREATE_ACCESS_TOKEN: Route = Route::new(Method::POST, "api/access-tokens");
    pub const ACCEPT_TERMS: Route = Route::new(Method::POST, "api/access-tokens/accept-terms");
    pub const REVOKE_PENDING_TOKEN: Route =
        Route::new(Method::POST, "api/access-tokens/revoke-pending-token");
    pub const DELETE_ACCESS_TOKEN: Route = Route::new(Method::DELETE, "api/access-tokens/me");
    pub const GET_TERMS: Route = Route::new(Method::GET, "api/terms/{type}");

    // Server and users
    pub const GET_CONFIG: Route = Route::new(Method::GET, "api/config");
    pub const GET_USER: Route = Route::new(Method::GET, "api/users/{id}");

    // Projects
    pub const GET_PROJECTS: Route = Route::new(Method::GET, "api/projects");
    pub const GET_PROJECT: Route = Route::new(Method::GET, "api/projects/{id}");

    // Boards
    pub const CREATE_BOARD: Route = Route::new(Method::POST, "api/projects/{projectId}/boards");
    pub const GET_BOARD: Route = Route::new(Method::GET, "api/boards/{id}");
    pub const UPDATE_BOARD: Route = Route::new(Method::PATCH, "api/boards/{id}");
    pub const DELETE_BOARD: Route = Route::new(Method::DELETE, "api/boards/{id}");

    // Lists
    pub const CREATE_LIST: Route = Route::new(Method::POST, "api/boards/{boardId}/lists");
    pub const GET_LIST: Route = Route::new(Method::GET, "api/lists/{id}");
    pub const UPDATE_LIST: Route = Route::new(Method::PATCH, "api/lists/{id}");
    pub const DELETE_LIST: Route = Route::new(Method::DELETE, "api/lists/{id}");
    pub const GET_LIST_CARDS: Route = Route::new(Method::GET, "api/lists/{listId}/cards");
    pub const MOVE_LIST_CARDS: Route = Route::new(Method::POST, "api/lists/{id}/move-cards");

    // Cards
    pub const CREATE_CARD: Route = Route::new(Method::POST, "api/lists/{listId}/cards");
    pub const GET_CARD: Route = Route::new(Method::GET, "api/cards/{id}");
    pub const UPDATE_CARD: Route = Route::new(Method::PATCH, "api/cards/{id}");
    pub const DELETE_CARD: Route = Route::new(Method::DELETE, "api/cards/{id}");
    pub const DUPLICATE_CARD: Route = Route::new(Method::POST, "api/cards/{id}/duplicate");
    pub const ADD_CARD_LABEL: Route = Route::new(Method::POST, "api/cards/{cardId}/card-labels");
    pub const REMOVE_CARD_LABEL: Route = Route::new(
        Method::DELETE,
        "api/cards/{cardId}/card-labels/labelId:{labelId}",
    );

    // Labels
    pub const CREATE_LABEL: Route = Route::new(Method::POST, "api/boards/{boardId}/labels");
    pub const UPDATE_LABEL: Route = Route::new(Method::PATCH, "api/labels/{id}");
    pub const DELETE_LABEL: Route = Route::new(Method::DELETE, "api/labels/{id}");

    // Task lists
    pub const CREATE_TASK_LIST: Route = Route::new(Method::POST, "api/cards/{cardId}/task-lists");
    pub const GET_TASK_LIST: Route = Route::new(Method::GET, "api/task-lists/{id}");
    pub const UPDATE_TASK_LIST: Route = Route::new(Method::PATCH, "api/task-lists/{id}");
    pub const DELETE_TASK_LIST: Route = Route::new(Method::DELETE, "api/task-lists/{id}");

    // Tasks
    pub const CREATE_TASK: Route = Route::new(Method::POST, "api/task-lists/{taskListId}/tasks");
    pub const UPDATE_TASK: Route = Route::new(Method::PATCH, "api/tasks/{id}");
    pub const DELETE_TASK: Route = Route::new(Method::DELETE, "api/tasks/{id}");

    // Custom field groups
    pub const CREATE_BOARD_CUSTOM_FIELD_GROUP: Route =
        Route::new(Method::POST, "api/boards/{boardId}/custom-field-groups");
    pub const CREATE_CARD_CUSTOM_FIELD_GROUP: Route =
        Route::new(Method::POST, "api/cards/{cardId}/custom-field-groups");
    pub const GET_CUSTOM_FIELD_GROUP: Route =
        Route::new(Method::GET, "api/custom-field-groups/{id}");
    pub const UPDATE_CUSTOM_FIELD_GROUP: Route =
        Route::new(Method::PATCH, "api/custom-field-groups/{id}");
    pub const DELETE_CUSTOM_FIELD_GROUP: Route =
        Route::new(Method::DELETE, "api/custom-field-groups/{id}");

    // Custom fields
    pub const CREATE_CUSTOM_FIELD: Route = Route::new(
        Method::POST,
        "api/custom-field-groups/{customFieldGroupId}/custom-fields",
    );
    pub const UPDATE_CUSTOM_FIELD: Route = Route::new(Method::PATCH, "api/custom-fields/{id}");
    pub const DELETE_CUSTOM_FIELD: Route = Route::new(Method::DELETE, "api/custom-fields/{id}");
}
