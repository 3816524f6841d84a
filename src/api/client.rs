//! API client for the Patina backend.
//!
//! All outbound calls go through `ApiClient::request`, which attaches the
//! stored access credential and performs a single transparent
//! refresh-and-retry when an authenticated request comes back 401. Typed
//! wrappers for the auth and user endpoints sit on top.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::models::UserResponse;

use super::transport::{HttpTransport, Transport, WireRequest, WireResponse};
use super::ApiError;

/// Token pair returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
    role: &'a str,
}

/// API client. Clone is cheap - the transport and token store share their
/// interiors.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    tokens: TokenStore,
    // Single-flight guard: at most one refresh call is in flight at a time.
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl ApiClient {
    /// Create a client against the given backend with the production
    /// HTTP transport.
    pub fn new(base_url: &str, tokens: TokenStore) -> Result<Self> {
        Ok(Self::with_transport(
            base_url,
            tokens,
            Arc::new(HttpTransport::new()?),
        ))
    }

    /// Create a client with an injected transport.
    pub fn with_transport(base_url: &str, tokens: TokenStore, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        bearer: Option<String>,
    ) -> Result<WireResponse, ApiError> {
        self.transport
            .send(WireRequest {
                method,
                url: format!("{}{}", self.base_url, path),
                bearer,
                body,
            })
            .await
    }

    /// Issue a request. Returns the parsed JSON body, or `None` for a 204.
    ///
    /// For authenticated requests a 401 triggers exactly one refresh-and-retry
    /// cycle; if that cycle cannot produce a fresh credential, or the retried
    /// request 401s again, stored credentials are cleared and the caller sees
    /// `ApiError::Unauthorized`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        requires_auth: bool,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let sent_token = if requires_auth {
            self.tokens.access()
        } else {
            None
        };

        let response = self
            .send(method.clone(), path, body.clone(), sent_token.clone())
            .await?;

        if response.status.as_u16() == 401 && requires_auth {
            debug!(path, "Authenticated request rejected, attempting token refresh");
            let fresh = self.refresh_access_token(sent_token.as_deref()).await?;
            let retried = self.send(method, path, body, Some(fresh)).await?;
            if retried.status.as_u16() == 401 {
                warn!(path, "Retried request rejected with fresh token");
                self.tokens.clear();
                return Err(ApiError::Unauthorized);
            }
            return Self::into_payload(retried);
        }

        Self::into_payload(response)
    }

    fn into_payload(response: WireResponse) -> Result<Option<serde_json::Value>, ApiError> {
        let status = response.status.as_u16();
        if status == 204 {
            return Ok(None);
        }
        if !response.status.is_success() {
            return Err(ApiError::from_status(status, &response.reason, &response.body));
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response body: {}", e)))
    }

    /// One-shot token refresh with a single-flight guard. Callers that queue
    /// behind an in-flight refresh pick up its result instead of refreshing
    /// again; two overlapping 401s produce one refresh call.
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited for the guard.
        if let Some(current) = self.tokens.access() {
            if stale != Some(current.as_str()) {
                return Ok(current);
            }
        }

        let Some(refresh) = self.tokens.refresh() else {
            debug!("No refresh credential stored");
            self.tokens.clear();
            return Err(ApiError::Unauthorized);
        };

        let outcome = self
            .send(Method::POST, "/auth/refresh", None, Some(refresh))
            .await;

        match outcome {
            Ok(response) if response.status.is_success() => {
                match serde_json::from_str::<AccessTokenResponse>(&response.body) {
                    Ok(parsed) => {
                        self.tokens.set_access(&parsed.access_token);
                        Ok(parsed.access_token)
                    }
                    Err(e) => {
                        warn!(error = %e, "Malformed refresh response");
                        self.tokens.clear();
                        Err(ApiError::Unauthorized)
                    }
                }
            }
            Ok(response) => {
                warn!(status = response.status.as_u16(), "Token refresh rejected");
                self.tokens.clear();
                Err(ApiError::Unauthorized)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                self.tokens.clear();
                Err(ApiError::Unauthorized)
            }
        }
    }

    // ===== Typed helpers =====

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        requires_auth: bool,
    ) -> Result<T, ApiError> {
        let payload = self.request(Method::GET, path, None, requires_auth).await?;
        Self::decode(path, payload)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        requires_auth: bool,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request body: {}", e)))?;
        let payload = self
            .request(Method::POST, path, Some(body), requires_auth)
            .await?;
        Self::decode(path, payload)
    }

    /// DELETE, tolerating both 204 and bodied 2xx responses.
    pub async fn delete(&self, path: &str, requires_auth: bool) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None, requires_auth)
            .await?;
        Ok(())
    }

    fn decode<T: DeserializeOwned>(
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let value = payload.ok_or_else(|| {
            ApiError::InvalidResponse(format!("Expected a response body from {}", path))
        })?;
        serde_json::from_value(value).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
        })
    }

    // ===== Auth & user endpoints =====

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        self.post(
            "/auth/login",
            &json!({ "username": username, "password": password }),
            false,
        )
        .await
    }

    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        self.post(
            "/users/",
            &CreateUserRequest {
                email,
                username,
                password,
                role: "user",
            },
            false,
        )
        .await
    }

    pub async fn me(&self) -> Result<UserResponse, ApiError> {
        self.get("/auth/me", true).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.delete("/auth/logout", true).await
    }

    pub async fn logout_refresh(&self) -> Result<(), ApiError> {
        self.delete("/auth/logout-refresh", true).await
    }

    pub async fn fetch_user(&self, id: &str) -> Result<UserResponse, ApiError> {
        self.get(&format!("/users/{}", id), true).await
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserResponse>, ApiError> {
        self.get("/users/", true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::scripted::ScriptedTransport;

    fn client_with(transport: Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::with_transport("http://test", TokenStore::in_memory(), transport)
    }

    #[tokio::test]
    async fn test_bearer_attached_when_required() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(200, r#"{"ok":true}"#);
        transport.push(200, r#"{"ok":true}"#);
        let client = client_with(transport.clone());
        client.tokens().set("tok-a", None);

        client
            .request(Method::GET, "/things", None, true)
            .await
            .unwrap();
        client
            .request(Method::GET, "/public", None, false)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].bearer.as_deref(), Some("tok-a"));
        assert_eq!(requests[1].bearer, None);
    }

    #[tokio::test]
    async fn test_204_resolves_to_no_value() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(204, "");
        let client = client_with(transport);

        let payload = client
            .request(Method::DELETE, "/auth/logout", None, false)
            .await
            .unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn test_refresh_and_retry_exactly_once() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(401, "");
        transport.push(200, r#"{"access_token":"tok-new"}"#);
        transport.push(200, r#"{"value":42}"#);
        let client = client_with(transport.clone());
        client.tokens().set("tok-old", Some("refresh-1"));

        let payload = client
            .request(Method::GET, "/things", None, true)
            .await
            .unwrap()
            .unwrap();
        // Caller observes only the retried response, never the 401
        assert_eq!(payload["value"], 42);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].bearer.as_deref(), Some("tok-old"));
        assert_eq!(requests[1].url, "http://test/auth/refresh");
        assert_eq!(requests[1].bearer.as_deref(), Some("refresh-1"));
        assert_eq!(requests[2].bearer.as_deref(), Some("tok-new"));
        assert_eq!(client.tokens().access().as_deref(), Some("tok-new"));
    }

    #[tokio::test]
    async fn test_retried_401_clears_tokens() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(401, "");
        transport.push(200, r#"{"access_token":"tok-new"}"#);
        transport.push(401, "");
        let client = client_with(transport);
        client.tokens().set("tok-old", Some("refresh-1"));

        let err = client
            .request(Method::GET, "/things", None, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(client.tokens().access().is_none());
        assert!(client.tokens().refresh().is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_tokens() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(401, "");
        transport.push(500, "refresh backend down");
        let client = client_with(transport);
        client.tokens().set("tok-old", Some("refresh-1"));

        let err = client
            .request(Method::GET, "/things", None, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(client.tokens().access().is_none());
        assert!(client.tokens().refresh().is_none());
    }

    #[tokio::test]
    async fn test_no_refresh_credential_clears_tokens() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(401, "");
        let client = client_with(transport.clone());
        client.tokens().set("tok-old", None);

        let err = client
            .request(Method::GET, "/things", None, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(client.tokens().access().is_none());
        // No refresh call was even attempted
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_request_never_refreshes() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(401, "");
        let client = client_with(transport.clone());
        client.tokens().set("tok-a", Some("refresh-1"));

        let err = client
            .request(Method::POST, "/auth/login", None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        // Login failure must not consume the stored credentials
        assert_eq!(client.tokens().access().as_deref(), Some("tok-a"));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_late_arrival_reuses_refreshed_token() {
        // A caller whose 401 raced an already-completed refresh retries with
        // the fresh token instead of refreshing again: the scripted transport
        // would panic on an unexpected /auth/refresh call.
        let transport = Arc::new(ScriptedTransport::new());
        let client = client_with(transport);
        client.tokens().set("tok-new", Some("refresh-1"));

        let fresh = client
            .refresh_access_token(Some("tok-stale"))
            .await
            .unwrap();
        assert_eq!(fresh, "tok-new");
    }

    #[tokio::test]
    async fn test_error_body_surfaced() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(422, r#"{"detail":[{"loc":["body","email"],"msg":"invalid email","type":"value_error"}]}"#);
        let client = client_with(transport);

        let err = client
            .request(Method::POST, "/users/", None, false)
            .await
            .unwrap_err();
        let details = err.validation_details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].msg, "invalid email");
    }
}
