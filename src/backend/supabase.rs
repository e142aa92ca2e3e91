//! Supabase REST gateway client.
//!
//! Procedures are called through PostgREST's `/rest/v1/rpc/<name>` endpoint
//! and the user lookup is a filtered `GET /rest/v1/users` asking for a single
//! object. Requests are sent once; callers decide whether to retry.

use super::{Backend, BackendError};
use crate::config::Config;
use crate::domain::User;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// PostgREST media type for "exactly one row"; zero or many rows yield 406.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Backend reaching a hosted Supabase project over HTTP.
#[derive(Clone)]
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseBackend {
    /// Create a backend for the project at `base_url` using a default client.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Create a backend around an existing client.
    pub fn with_client(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build the client from configuration, applying the optional request timeout.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self::with_client(
            client,
            &config.supabase_url,
            config.supabase_anon_key.clone(),
        ))
    }

    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
    }
}

impl fmt::Debug for SupabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseBackend")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Backend for SupabaseBackend {
    async fn rpc(
        &self,
        function: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        debug!(function, "Calling remote procedure");

        let response = self
            .authorized(self.client.post(self.rpc_url(function)))
            .json(&params)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn find_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, BackendError> {
        let filters = [
            ("select", "*".to_string()),
            ("username", format!("eq.{}", username)),
            ("password", format!("eq.{}", password)),
        ];

        let response = self
            .authorized(self.client.get(self.table_url("users")))
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&filters)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_ACCEPTABLE {
            debug!("User lookup did not match exactly one row");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        response
            .json::<User>()
            .await
            .map(Some)
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

async fn error_from_response(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    BackendError::Http {
        status,
        message: gateway_message(&body),
    }
}

/// Extract `message` from a PostgREST error body, falling back to the raw text.
fn gateway_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| trimmed.to_string())
}
