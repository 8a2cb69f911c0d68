//! Cloudflare API client implementation.

use crate::api::*;
use driftdns_core::{ApiResponse, Credentials, DriftError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The Cloudflare API base URL
const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authentication headers expected on every request
const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";
const AUTH_KEY_HEADER: &str = "X-Auth-Key";

/// Cloudflare DNS API client
#[derive(Clone)]
pub struct CloudflareClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    credentials: Credentials,
    base_url: String,
    timeout_secs: u64,
}

impl CloudflareClient {
    /// Create a new client with the given credentials using default settings
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        CloudflareClientBuilder::new(credentials).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(credentials: Credentials) -> CloudflareClientBuilder {
        CloudflareClientBuilder::new(credentials)
    }

    /// Access zone endpoints
    #[must_use]
    pub fn zones(&self) -> ZonesApi<'_> {
        ZonesApi::new(self)
    }

    /// Access DNS record endpoints
    #[must_use]
    pub fn records(&self) -> RecordsApi<'_> {
        RecordsApi::new(self)
    }

    /// Perform a GET request and unwrap the response envelope
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!(url = %url, "GET request");

        let response = self
            .authed(self.inner.http.get(&url))
            .send()
            .await
            .map_err(|e| transport_error(&e, self.inner.timeout_secs))?;

        self.handle_response(response).await
    }

    /// Perform a PUT request with a JSON body, succeeding only when the
    /// provider flags the operation successful
    pub(crate) async fn put<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.build_url(path);
        debug!(url = %url, "PUT request");

        let response = self
            .authed(self.inner.http.put(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.inner.timeout_secs))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| DriftError::Http(e.to_string()))?;
            let envelope: ApiResponse<serde_json::Value> =
                serde_json::from_str(&body).map_err(DriftError::Json)?;
            envelope.ensure_success()
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Attach the fixed authentication and content-type headers.
    ///
    /// The provider expects the JSON content type on listing calls too,
    /// not just on bodied requests.
    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(AUTH_EMAIL_HEADER, &self.inner.credentials.email)
            .header(AUTH_KEY_HEADER, &self.inner.credentials.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Handle a response carrying the standard envelope
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| DriftError::Http(e.to_string()))?;
            let envelope: ApiResponse<T> =
                serde_json::from_str(&body).map_err(DriftError::Json)?;
            envelope.into_result()
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a DriftError
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let body = response.text().await.unwrap_or_default();

        // Error bodies usually carry the same envelope with success = false.
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .map(|envelope| envelope.error_summary())
            .unwrap_or(body);

        match status {
            401 | 403 => Err(DriftError::Unauthorized),
            _ => Err(DriftError::Api {
                code: status,
                message,
            }),
        }
    }
}

/// Builder for configuring a [`CloudflareClient`]
pub struct CloudflareClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl CloudflareClientBuilder {
    /// Create a new builder with the given credentials
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("driftdns/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> CloudflareClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        CloudflareClient {
            inner: Arc::new(ClientInner {
                http,
                credentials: self.credentials,
                base_url: self.base_url,
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}

/// Map a transport failure onto the error taxonomy, shared with the
/// detection client
pub(crate) fn transport_error(err: &reqwest::Error, timeout_secs: u64) -> DriftError {
    if err.is_timeout() {
        DriftError::Timeout(timeout_secs)
    } else if err.is_connect() {
        DriftError::Connection(err.to_string())
    } else {
        DriftError::Http(err.to_string())
    }
}
