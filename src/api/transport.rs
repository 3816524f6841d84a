//! HTTP transport seam.
//!
//! The API client speaks to the wire through the `Transport` trait so tests
//! can inject a scripted transport and drive the refresh-and-retry logic
//! without a server. `HttpTransport` is the production implementation on top
//! of `reqwest`.

use anyhow::Result;
use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// An outbound request, already resolved to a full URL.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// A raw response: status plus unparsed body text. Status is checked by the
/// client before any JSON parsing happens.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: StatusCode,
    pub reason: String,
    pub body: String,
}

pub trait Transport: Send + Sync {
    /// Send a request. `Err` is reserved for transport-level failures
    /// (DNS, connect, timeout); any HTTP status comes back as `Ok`.
    fn send(&self, request: WireRequest) -> BoxFuture<'_, Result<WireResponse, ApiError>>;
}

/// Production transport.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: WireRequest) -> BoxFuture<'_, Result<WireResponse, ApiError>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, &request.url);
            if let Some(token) = request.bearer {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = request.body {
                builder = builder.json(&body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status();
            let reason = status.canonical_reason().unwrap_or("").to_string();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            Ok(WireResponse {
                status,
                reason,
                body,
            })
        })
    }
}
