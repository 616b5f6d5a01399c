//! Logging on, terms acceptance and logging out.

use std::fmt;

use planka_config::Credentials;
use planka_protocol::{Item, User};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::{Auth, PlankaClient};
use crate::error::{Error, Result};
use crate::route::routes;

/// Which terms of service document to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermsType {
    /// Terms shown to regular users.
    #[default]
    General,
    /// Terms shown to administrators.
    Extended,
}

impl TermsType {
    /// Returns the path segment naming this document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for TermsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terms of service document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terms {
    /// Which document this is.
    #[serde(rename = "type")]
    pub terms_type: TermsType,
    /// Language of the content.
    #[serde(default)]
    pub language: Option<String>,
    /// Markdown content.
    pub content: String,
    /// Signature to send back when accepting.
    pub signature: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenRequest<'a> {
    email_or_username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptTermsRequest<'a> {
    pending_token: &'a str,
    signature: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingTokenRequest<'a> {
    pending_token: &'a str,
}

impl PlankaClient {
    /// Authenticates with the configured credentials and returns the current
    /// user.
    ///
    /// An API key needs no exchange: the key is verified by fetching the
    /// user. A username and password are exchanged for a bearer token that
    /// every later request carries.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingCredentials`] if no credentials were configured.
    /// - [`Error::TermsAcceptanceRequired`] if the server wants the terms
    ///   accepted first; see [`accept_terms`](Self::accept_terms).
    /// - [`Error::Api`] if the server rejects the credentials.
    #[instrument(skip(self))]
    pub async fn logon(&self) -> Result<User> {
        match &self.session.credentials {
            None => return Err(Error::MissingCredentials),
            Some(Credentials::ApiKey(key)) => {
                self.session.set_auth(Some(Auth::ApiKey(key.clone()))).await;
            }
            Some(Credentials::Password { username, password }) => {
                debug!(username, "exchanging password for an access token");
                let body = AccessTokenRequest {
                    email_or_username: username,
                    password: password.expose_secret(),
                };
                let token: Item<String> = self
                    .send(routes::CREATE_ACCESS_TOKEN.request().json(&body)?)
                    .await?;
                self.store_token(token.into_inner()).await;
            }
        }
        self.me().await
    }

    /// Fetches the terms the user must accept, accepts them with the pending
    /// token from [`Error::TermsAcceptanceRequired`], and stores the issued
    /// access token.
    ///
    /// Returns the accepted document so it can be shown to the user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the token expired or the terms could not be
    /// fetched.
    #[instrument(skip(self, pending_token))]
    pub async fn accept_terms(
        &self,
        pending_token: &SecretString,
        terms_type: TermsType,
    ) -> Result<Terms> {
        let mut request = routes::GET_TERMS
            .request()
            .param("type", terms_type.as_str());
        if let Some(language) = self.session.language() {
            request = request.query("language", language);
        }
        let terms: Terms = self.send::<Item<Terms>>(request).await?.into_inner();

        let body = AcceptTermsRequest {
            pending_token: pending_token.expose_secret(),
            signature: &terms.signature,
        };
        let token: Item<String> = self
            .send(routes::ACCEPT_TERMS.request().json(&body)?)
            .await?;
        self.store_token(token.into_inner()).await;
        debug!(terms = %terms.terms_type, "terms accepted");
        Ok(terms)
    }

    /// Abandons a pending login, invalidating its pending token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the server rejects the token.
    #[instrument(skip(self, pending_token))]
    pub async fn revoke_pending_token(&self, pending_token: &SecretString) -> Result<()> {
        let body = PendingTokenRequest {
            pending_token: pending_token.expose_secret(),
        };
        self.execute(routes::REVOKE_PENDING_TOKEN.request().json(&body)?)
            .await?;
        Ok(())
    }

    /// Invalidates the bearer token on the server and forgets it.
    ///
    /// API key sessions have no token to revoke and stay authorized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the server rejects the request; the token is
    /// forgotten anyway.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        match self.session.auth().await {
            Some(Auth::Bearer(_)) => {
                let result = self.execute(routes::DELETE_ACCESS_TOKEN.request()).await;
                self.session.set_auth(None).await;
                result.map(|_| ())
            }
            Some(Auth::ApiKey(_)) => {
                debug!("API key sessions have no access token to revoke");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Returns whether requests are currently authorized.
    pub async fn is_authenticated(&self) -> bool {
        self.session.auth().await.is_some()
    }

    async fn store_token(&self, token: String) {
        self.session
            .set_auth(Some(Auth::Bearer(SecretString::from(token))))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user() -> serde_json::Value {
        json!({"item": {"id": "9001", "name": "Demo Demo", "username": "demo"}})
    }

    #[tokio::test]
    async fn logon_without_credentials_fails() {
        let client = PlankaClient::builder("http://localhost:1").build().unwrap();
        assert!(matches!(
            client.logon().await,
            Err(Error::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn password_logon_stores_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/access-tokens"))
            .and(body_json(json!({"emailOrUsername": "demo", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": "tok"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user()))
            .expect(1)
            .mount(&server)
            .await;

        let client = PlankaClient::builder(server.uri())
            .credentials(Credentials::password("demo", "secret"))
            .build()
            .unwrap();
        assert!(!client.is_authenticated().await);

        let me = client.logon().await.unwrap();
        assert_eq!(me.id, "9001");
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn api_key_logon_sends_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("x-api-key", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user()))
            .expect(1)
            .mount(&server)
            .await;

        let client = PlankaClient::builder(server.uri())
            .credentials(Credentials::api_key("key"))
            .build()
            .unwrap();
        assert_eq!(client.logon().await.unwrap().name, "Demo Demo");
    }

    #[tokio::test]
    async fn terms_flow() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/access-tokens"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "E_FORBIDDEN",
                "message": "Terms acceptance required",
                "step": "accept-terms",
                "pendingToken": "pending"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/terms/general"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "item": {
                    "type": "general",
                    "language": "en-US",
                    "content": "# Terms",
                    "signature": "sig"
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/access-tokens/accept-terms"))
            .and(body_json(json!({"pendingToken": "pending", "signature": "sig"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": "tok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = PlankaClient::builder(server.uri())
            .credentials(Credentials::password("demo", "secret"))
            .language("en-US")
            .build()
            .unwrap();

        let pending_token = match client.logon().await {
            Err(Error::TermsAcceptanceRequired { pending_token }) => pending_token,
            other => panic!("expected terms acceptance, got {other:?}"),
        };
        let terms = client
            .accept_terms(&pending_token, TermsType::General)
            .await
            .unwrap();
        assert_eq!(terms.content, "# Terms");
        assert!(client.is_authenticated().await);
    }

    #[tokio::test]
    async fn revoke_pending_token_posts_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/access-tokens/revoke-pending-token"))
            .and(body_json(json!({"pendingToken": "pending"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": null})))
            .expect(1)
            .mount(&server)
            .await;

        let client = PlankaClient::builder(server.uri()).build().unwrap();
        client
            .revoke_pending_token(&SecretString::from("pending".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn logout_deletes_token_and_forgets_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/access-tokens"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": "tok"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user()))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/access-tokens/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": "tok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = PlankaClient::builder(server.uri())
            .credentials(Credentials::password("demo", "secret"))
            .build()
            .unwrap();
        client.logon().await.unwrap();
        client.logout().await.unwrap();
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_keeps_api_key() {
        let client = PlankaClient::builder("http://localhost:1")
            .credentials(Credentials::api_key("key"))
            .build()
            .unwrap();
        client.logout().await.unwrap();
        assert!(client.is_authenticated().await);
    }
}
