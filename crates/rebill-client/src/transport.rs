//! HTTP transport seam.
//!
//! The network layer lives behind a trait so tests can substitute a
//! double that records and returns its inputs without touching the
//! network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::{json, Value};

use rebill_core::{CompiledRequest, Method};

use crate::error::ClientError;

/// Fixed basic-auth password expected by the API; the key does the
/// authenticating.
const BASIC_AUTH_PASSWORD: &str = "x";

/// API credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Wrap an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// The API key, used as the basic-auth username.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Raw response produced by a transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// Executes compiled requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` with `credentials`, returning the raw
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] when the request never
    /// reached the server.
    async fn execute(
        &self,
        request: &CompiledRequest,
        credentials: &Credentials,
    ) -> Result<RawResponse, ClientError>;
}

/// Production transport over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen
    /// with default settings).
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rebill-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: &CompiledRequest,
        credentials: &Credentials,
    ) -> Result<RawResponse, ClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .basic_auth(credentials.api_key(), Some(BASIC_AUTH_PASSWORD))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        builder = match &request.body {
            Some(body) => builder.body(body.clone()),
            None => builder.header(CONTENT_LENGTH, "0"),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, url = %request.url, "received response");
        Ok(RawResponse { status, body })
    }
}

/// Decode a response body as JSON.
///
/// A payload that is not valid JSON is wrapped under a `body` field
/// instead of failing outright.
#[must_use]
pub fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| json!({ "body": String::from_utf8_lossy(bytes) }))
}
