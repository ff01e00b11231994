//! Shared HTTP client for the TaskFlow API.
//!
//! Owns the base URL and the bearer token; every request goes through
//! here so auth injection and error mapping live in one place. Cloning is
//! cheap and clones share the token cell, so the session store setting a
//! token after login is immediately visible to the task store.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use taskflow_core::ApiError;
use taskflow_core::error_parsing::parse_api_error;

use crate::config::ClientConfig;

/// HTTP client with base-URL and token injection.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Build a client from config.
    ///
    /// A trailing slash on `base_url` is trimmed so path joining is
    /// uniform.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Set the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// GET `path`, decoding the JSON response body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.url(path));
        self.execute(request).await
    }

    /// POST `body` as JSON to `path`, decoding the JSON response body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request).await
    }

    /// POST to `path` with an empty body, decoding the JSON response body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.post(self.url(path));
        self.execute(request).await
    }

    /// PUT `body` as JSON to `path`, decoding the JSON response body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)).json(body);
        self.execute(request).await
    }

    /// DELETE `path`, discarding the response body (204 on success).
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.http.delete(self.url(path));
        let _ = self.send_checked(request).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach auth, send, and map non-2xx to [`ApiError::Api`].
    async fn send_checked(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        if let Some(token) = self.token.read().clone() {
            request = request.header(AUTHORIZATION, format!("Token {token}"));
        }

        let response = request.send().await.map_err(ApiError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_api_error(&body, status.as_u16());
            debug!(status = status.as_u16(), %message, "API error");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send_checked(request).await?;
        response.json().await.map_err(ApiError::Http)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
