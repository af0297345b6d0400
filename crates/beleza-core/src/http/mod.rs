//! Authenticated HTTP client for the booking API.
//!
//! Attaches the session's bearer token and store header to every outbound
//! request, and recovers from exactly one class of failure (expired access
//! token) with a single refresh-and-retry cycle. All other failures are
//! normalized into [`ApiError`] and returned to the caller.

mod error;

pub use error::{ApiError, ApiErrorKind, ApiResult};

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::session::{Session, SessionStore};

/// Standard User-Agent header for beleza API requests.
pub const USER_AGENT: &str = concat!("beleza/", env!("CARGO_PKG_VERSION"));

/// Store (tenant) header attached to scoped requests.
pub const STORE_HEADER: &str = "x-store-id";

const REFRESH_PATH: &str = "/auth/refresh-token";

/// Callback invoked when the session terminally expires.
///
/// Injected by the application shell at construction so the transport layer
/// never depends on the auth/UI layer.
pub type SignOutHandler = Arc<dyn Fn() + Send + Sync>;

/// Per-request lifecycle state; carries the at-most-one-retry allowance.
#[derive(Debug, Clone, Copy)]
struct RequestContext {
    attempt: u8,
}

impl RequestContext {
    fn first() -> Self {
        Self { attempt: 0 }
    }

    fn retried(self) -> Self {
        Self {
            attempt: self.attempt + 1,
        }
    }

    fn can_retry(self) -> bool {
        self.attempt == 0
    }
}

/// Wire shape of the refresh endpoint response.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: Config,
    store: Option<SessionStore>,
    sign_out: Option<SignOutHandler>,
}

impl ApiClientBuilder {
    /// Overrides the session store (default: `${BELEZA_HOME}/session.json`).
    pub fn session_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Injects the global sign-out callback invoked on a terminal 401.
    pub fn sign_out_handler(mut self, handler: SignOutHandler) -> Self {
        self.sign_out = Some(handler);
        self
    }

    /// Builds the client, loading the persisted session.
    ///
    /// # Panics
    /// In test builds, panics if `base_url` resolves to the production API.
    /// Point tests at a mock server instead.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the session file
    /// cannot be read.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self.config.resolved_base_url()?;

        #[cfg(test)]
        assert_ne!(
            base_url,
            crate::config::DEFAULT_BASE_URL,
            "Tests must not use the production booking API. \
             Set base_url to a mock server (e.g., wiremock)."
        );

        let mut builder = reqwest::Client::builder();
        if self.config.request_timeout_secs > 0 {
            builder = builder.timeout(std::time::Duration::from_secs(u64::from(
                self.config.request_timeout_secs,
            )));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let store = self.store.unwrap_or_else(SessionStore::open_default);
        let session = store.load().context("Failed to load session")?;

        Ok(ApiClient {
            base_url,
            default_store: self.config.store_id,
            http,
            store,
            session: RwLock::new(session),
            refresh_gate: Mutex::new(()),
            sign_out: self.sign_out,
        })
    }
}

/// Authenticated client for the booking API.
pub struct ApiClient {
    base_url: String,
    /// Fallback store id from config, used when the session carries none
    default_store: Option<String>,
    http: reqwest::Client,
    store: SessionStore,
    session: RwLock<Session>,
    /// Serializes token refreshes so concurrent 401s coalesce onto one
    refresh_gate: Mutex<()>,
    sign_out: Option<SignOutHandler>,
}

impl ApiClient {
    /// Returns a builder for the given configuration.
    pub fn builder(config: Config) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            store: None,
            sign_out: None,
        }
    }

    /// Returns the resolved base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Replaces the session, write-through to disk.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub async fn replace_session(&self, session: Session) -> Result<()> {
        let mut current = self.session.write().await;
        self.store.save(&session)?;
        *current = session;
        Ok(())
    }

    /// Clears the session in memory and on disk.
    ///
    /// # Errors
    /// Returns an error if the persisted session cannot be removed.
    pub async fn clear_session(&self) -> Result<()> {
        let mut current = self.session.write().await;
        *current = Session::default();
        self.store.clear()?;
        Ok(())
    }

    /// Issues a GET request and decodes the JSON response.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::GET, path, None, None).await?;
        decode(response).await
    }

    /// Issues a GET request with query parameters.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let query: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        let response = self
            .send(Method::GET, path, Some(query.as_slice()), None)
            .await?;
        decode(response).await
    }

    /// Issues a POST request with a JSON body.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = to_body(body)?;
        let response = self.send(Method::POST, path, None, Some(&body)).await?;
        decode(response).await
    }

    /// Issues a PUT request with a JSON body.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = to_body(body)?;
        let response = self.send(Method::PUT, path, None, Some(&body)).await?;
        decode(response).await
    }

    /// Issues a DELETE request, discarding any response body.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.send(Method::DELETE, path, None, None).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    /// Full request pipeline: attach session headers, dispatch, and recover
    /// from an expired token with at most one refresh-and-retry.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<&Value>,
    ) -> ApiResult<reqwest::Response> {
        let mut ctx = RequestContext::first();

        loop {
            let response = self.dispatch(&method, path, query, body).await?;
            let status = response.status();
            tracing::debug!(%status, path, "api response");

            if status != StatusCode::UNAUTHORIZED {
                if status.is_success() {
                    return Ok(response);
                }
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_status(status.as_u16(), &body));
            }

            if ctx.can_retry() && self.refresh_session().await.is_ok() {
                ctx = ctx.retried();
                continue;
            }

            // Refresh failed or the retry was already spent: the session is gone.
            let body = response.text().await.unwrap_or_default();
            self.force_sign_out().await;
            return Err(ApiError::session_expired(&body));
        }
    }

    /// Builds and sends one request, attaching auth/store headers from the
    /// current session.
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<&Value>,
    ) -> ApiResult<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .header("user-agent", USER_AGENT);

        {
            let session = self.session.read().await;
            if let Some(token) = session.auth_token.as_deref() {
                builder = builder.header("authorization", format!("Bearer {token}"));
            }
            if let Some(store) = session
                .store_id
                .as_deref()
                .or(self.default_store.as_deref())
            {
                builder = builder.header(STORE_HEADER, store);
            }
        }

        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
            tracing::trace!(%body, "request payload");
        }

        tracing::debug!(%method, %url, "api request");

        builder
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))
    }

    /// Refreshes the access token using the current (possibly stale) token,
    /// write-through to the session store.
    ///
    /// Concurrent 401s coalesce here: the gate serializes refreshes, and a
    /// waiter re-reads the session after acquiring it so it can skip its own
    /// refresh call when another request already replaced the token.
    async fn refresh_session(&self) -> ApiResult<()> {
        let stale = self.session.read().await.auth_token.clone();
        let Some(stale) = stale else {
            return Err(ApiError::session_expired(""));
        };

        let _gate = self.refresh_gate.lock().await;
        if self.session.read().await.auth_token.as_deref() != Some(stale.as_str()) {
            return Ok(());
        }

        let url = format!("{}{REFRESH_PATH}", self.base_url);
        tracing::debug!(%url, "refreshing access token");

        let response = self
            .http
            .post(&url)
            .header("accept", "application/json")
            .header("user-agent", USER_AGENT)
            .bearer_auth(&stale)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let refreshed: RefreshResponse = response.json().await.map_err(|e| {
            ApiError::new(
                ApiErrorKind::Http,
                format!("Failed to decode refresh response: {e}"),
            )
        })?;

        let mut session = self.session.write().await;
        session.auth_token = Some(refreshed.access_token);
        if let Err(err) = self.store.save(&session) {
            tracing::warn!(?err, "failed to persist refreshed session");
        }

        Ok(())
    }

    /// Clears the session and notifies the application shell.
    async fn force_sign_out(&self) {
        {
            let mut session = self.session.write().await;
            *session = Session::default();
        }
        if let Err(err) = self.store.clear() {
            tracing::warn!(?err, "failed to clear persisted session");
        }

        match &self.sign_out {
            Some(handler) => handler(),
            None => tracing::warn!("session expired but no sign-out handler is registered"),
        }
    }
}

fn to_body<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| {
        ApiError::new(
            ApiErrorKind::Http,
            format!("Failed to serialize request body: {e}"),
        )
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    response.json().await.map_err(|e| {
        ApiError::new(
            ApiErrorKind::Http,
            format!("Failed to decode response body: {e}"),
        )
    })
}

fn classify_transport_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network(format!("Could not reach the server: request timed out ({e})"))
    } else if e.is_connect() {
        ApiError::network(format!("Could not reach the server: connection failed ({e})"))
    } else {
        ApiError::network(format!("Could not reach the server: {e}"))
    }
}
