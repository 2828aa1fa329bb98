use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shiftdesk_types::ApiConfig;

use crate::error::ClientError;
use crate::token_store::TokenStore;

/// Per-call options.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Attach the stored bearer token, if there is one.
    pub requires_auth: bool,
    /// Extra headers; these win over the configured defaults.
    pub headers: BTreeMap<String, String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { requires_auth: true, headers: BTreeMap::new() }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never send the bearer token.
    pub fn anonymous() -> Self {
        Self { requires_auth: false, ..Self::default() }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// JSON-over-HTTP client for the backend.
///
/// Cheap to clone; clones share the connection pool, config and token store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ApiConfig>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { http, config: Arc::new(config), tokens })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    fn build_headers(
        &self,
        overrides: &BTreeMap<String, String>,
        requires_auth: bool,
        has_body: bool,
    ) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.config.default_headers.iter().chain(overrides) {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::Transport(format!("Invalid header name {}: {}", name, e))
            })?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Transport(format!("Invalid header value: {}", e)))?;
            // insert() replaces, so later (per-call) entries win
            headers.insert(name, value);
        }

        if has_body && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if requires_auth {
            if let Some(token) = self.tokens.load().filter(|t| !t.is_empty()) {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ClientError::Transport(format!("Invalid token: {}", e)))?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }

    /// Send one request and decode the JSON response as `T`.
    ///
    /// Single attempt; the whole exchange is bounded by the configured timeout.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        let headers = self.build_headers(&options.headers, options.requires_auth, body.is_some())?;
        let timeout_ms = self.config.timeout_ms;

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ClientError::Transport(format!("Failed to serialize body: {}", e)))?;
            builder = builder.body(bytes);
        }

        tracing::debug!(%method, %url, auth = options.requires_auth, "Sending request");

        let exchange = async {
            let resp = builder.send().await?;
            let status = resp.status();
            let bytes = resp.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        // Dropping the exchange future on expiry cancels the in-flight request.
        let (status, bytes) = match tokio::time::timeout(self.config.timeout(), exchange).await {
            Err(_) => {
                tracing::warn!(%method, %url, timeout_ms, "Request timed out");
                return Err(ClientError::Timeout { timeout_ms });
            }
            Ok(Err(e)) => return Err(ClientError::from_reqwest(e, timeout_ms)),
            Ok(Ok(parts)) => parts,
        };

        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(http_error(status, &bytes));
        }

        decode_body(&bytes)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        self.request::<(), T>(Method::GET, path, None, options).await
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), options).await
    }

    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body), options).await
    }

    pub async fn patch<B, T>(
        &self,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, body, options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        self.request::<(), T>(Method::DELETE, path, None, options).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish_non_exhaustive()
    }
}

fn http_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
    ClientError::Http { status: status.as_u16(), message }
}

/// Empty bodies decode as JSON `null`, so `()` and `Option<_>` targets succeed.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| ClientError::Decode(format!("empty body: {}", e)));
    }
    serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
