//! HTTP client for the monitoring service.
//!
//! ## Example
//!
//! ```rust,no_run
//! use focuswatch::api::{ApiClient, StatusEndpoint};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::builder()
//!         .base_url("http://127.0.0.1:8000")
//!         .session_token("eyJhbGciOi...")
//!         .build()?;
//!
//!     let payload = client.fetch_status(&StatusEndpoint::Child).await?;
//!     println!("score: {}", payload.concentration_score);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, COOKIE, PRAGMA};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use focuswatch_types::StatusPayload;

use super::session::{session_token_from_headers, SESSION_COOKIE};
use super::{Role, StatusEndpoint};
use crate::account::{
    AddChild, ChildCode, ChildLogin, ChildRegistration, ParentLogin, ParentRegistration,
};
use crate::error::{ApiError, FetchError};
use crate::poller::StatusFetcher;

/// JSON reply of the login, registration and add-child endpoints.
#[derive(Debug, Deserialize)]
struct ActionReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    child_code: Option<String>,
}

/// Outcome of a successful child registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Code to hand to the parent.
    pub child_code: String,
    /// Session started by the registration, if the server set one.
    pub session_token: Option<String>,
}

/// Client for the monitoring service endpoints.
///
/// Redirects are not followed: the parent form endpoints answer with a 303
/// that carries the session cookie, and following it would lose the cookie.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_token {
            Some(token) => request.header(COOKIE, format!("{}={}", SESSION_COOKIE, token)),
            None => request,
        }
    }

    /// Read the status endpoint once, bypassing any HTTP cache.
    pub async fn fetch_status(
        &self,
        endpoint: &StatusEndpoint,
    ) -> Result<StatusPayload, FetchError> {
        let url = self.url(&endpoint.path());

        let response = self
            .with_session(self.client.get(&url))
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::SessionExpired);
        }
        if !status.is_success() {
            return Err(FetchError::Transient {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }

    /// Face login for a child. Returns the session token on success.
    pub async fn child_login(&self, form: &ChildLogin) -> Result<String, ApiError> {
        form.validate()?;
        info!(username = %form.username, "Child login");

        let response = self
            .client
            .post(self.url("/child/login"))
            .json(form)
            .send()
            .await?;

        let token = session_token_from_headers(response.headers());
        let (status, reply) = read_action_reply(response).await?;

        if status.is_success() && reply.success {
            token.ok_or_else(|| ApiError::Rejected {
                message: Some("server did not start a session".to_string()),
            })
        } else {
            Err(ApiError::Rejected {
                message: reply.message,
            })
        }
    }

    /// Register a child's face and profile.
    pub async fn child_register(&self, form: &ChildRegistration) -> Result<Registration, ApiError> {
        form.validate()?;
        info!(username = %form.username, region = %form.region, "Child registration");

        let response = self
            .client
            .post(self.url("/child/register"))
            .json(form)
            .send()
            .await?;

        let session_token = session_token_from_headers(response.headers());
        let (status, reply) = read_action_reply(response).await?;

        match (status.is_success() && reply.success, reply.child_code) {
            (true, Some(child_code)) => Ok(Registration {
                child_code,
                session_token,
            }),
            (true, None) => Err(ApiError::Malformed("reply is missing child_code".to_string())),
            (false, _) => Err(ApiError::Rejected {
                message: reply.message,
            }),
        }
    }

    /// Password login for a parent. Returns the session token on success.
    ///
    /// The server answers a good login with a redirect to the dashboard and
    /// re-renders the login form (200) on bad credentials.
    pub async fn parent_login(&self, form: &ParentLogin) -> Result<String, ApiError> {
        form.validate()?;
        info!(username = %form.username, "Parent login");

        let response = self
            .client
            .post(self.url("/parent/login"))
            .form(form)
            .send()
            .await?;

        if response.status().is_redirection() {
            if let Some(token) = session_token_from_headers(response.headers()) {
                return Ok(token);
            }
        }
        debug!(status = %response.status(), "Parent login not accepted");
        Err(ApiError::Rejected { message: None })
    }

    /// Register a parent account linked to an existing child code.
    pub async fn parent_register(&self, form: &ParentRegistration) -> Result<(), ApiError> {
        form.validate()?;
        info!(username = %form.username, child_code = %form.child_code.trim(), "Parent registration");

        let response = self
            .client
            .post(self.url("/parent/register"))
            .form(form)
            .send()
            .await?;

        if response.status().is_redirection() {
            Ok(())
        } else {
            Err(ApiError::Rejected { message: None })
        }
    }

    /// Link another child to the logged-in parent.
    pub async fn add_child(&self, child_code: &ChildCode) -> Result<(), ApiError> {
        info!(child_code = %child_code, "Adding child");

        let body = AddChild {
            child_code: child_code.clone(),
        };
        let response = self
            .with_session(self.client.post(self.url("/parent/add-child")))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(FetchError::SessionExpired.into());
        }

        let (_, reply) = read_action_reply(response).await?;
        if reply.success {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: reply.message,
            })
        }
    }

    /// End the session. Returns the entry view to go to next.
    pub async fn logout(&self, role: Role) -> Result<&'static str, ApiError> {
        let response = self
            .with_session(self.client.post(self.url(role.logout_path())))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            info!(?role, "Logged out");
            Ok(role.entry_path())
        } else {
            warn!(%status, "Logout failed");
            Err(FetchError::Transient {
                status: status.as_u16(),
            }
            .into())
        }
    }
}

/// Decode an action reply, keeping the raw body when it is not JSON.
async fn read_action_reply(response: Response) -> Result<(StatusCode, ActionReply), ApiError> {
    let status = response.status();
    let raw = response.text().await?;
    match serde_json::from_str::<ActionReply>(&raw) {
        Ok(reply) => Ok((status, reply)),
        Err(e) => {
            warn!(%status, error = %e, "Reply is not JSON");
            Err(ApiError::Malformed(raw))
        }
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    session_token: Option<String>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout: Duration::from_secs(5),
            session_token: None,
        }
    }
}

impl ApiClientBuilder {
    /// Set the service base URL (e.g., "http://127.0.0.1:8000").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn maybe_session_token(mut self, token: Option<String>) -> Self {
        self.session_token = token;
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(ApiClient {
            client,
            base_url: self.base_url,
            session_token: self.session_token,
        })
    }
}

/// A [`StatusFetcher`] bound to one status endpoint.
#[derive(Debug, Clone)]
pub struct StatusReader {
    client: ApiClient,
    endpoint: StatusEndpoint,
}

impl StatusReader {
    pub fn new(client: ApiClient, endpoint: StatusEndpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &StatusEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl StatusFetcher for StatusReader {
    async fn fetch(&self) -> Result<StatusPayload, FetchError> {
        self.client.fetch_status(&self.endpoint).await
    }

    fn describe(&self) -> String {
        format!("{}{}", self.client.base_url(), self.endpoint.path())
    }
}
