//! Public-address detection over plain-text echo endpoints.
//!
//! Each endpoint answers a single request with its caller's public address
//! as the response body. The endpoints are family-pinned: the v4 endpoint is
//! reachable over IPv4 only, so a dual-stack machine cannot get the wrong
//! family's answer.

use driftdns_core::{DetectorConfig, DriftError, Result};
use reqwest::Client as HttpClient;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::client::transport_error;

/// Default detection timeout; echo endpoints answer in well under a second
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the public-address echo endpoints
#[derive(Clone, Debug)]
pub struct EchoClient {
    http: HttpClient,
    ipv4_url: String,
    ipv6_url: String,
    timeout_secs: u64,
}

impl EchoClient {
    /// Build a detection client, validating both endpoint URLs.
    ///
    /// A malformed URL is a configuration error so that a typo surfaces at
    /// startup instead of failing every cycle.
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Build a detection client with a custom per-request timeout
    pub fn with_timeout(config: &DetectorConfig, timeout: Duration) -> Result<Self> {
        for raw in [&config.ipv4_url, &config.ipv6_url] {
            Url::parse(raw)
                .map_err(|e| DriftError::Config(format!("detector URL {raw:?}: {e}")))?;
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(format!("driftdns/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DriftError::Http(e.to_string()))?;

        Ok(Self {
            http,
            ipv4_url: config.ipv4_url.clone(),
            ipv6_url: config.ipv6_url.clone(),
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Ask the IPv4 endpoint for the machine's public address
    pub async fn lookup_v4(&self) -> Result<Ipv4Addr> {
        let body = self.fetch(&self.ipv4_url).await?;
        body.parse()
            .map_err(|_| DriftError::InvalidAddress(truncate(&body)))
    }

    /// Ask the IPv6 endpoint for the machine's public address
    pub async fn lookup_v6(&self) -> Result<Ipv6Addr> {
        let body = self.fetch(&self.ipv6_url).await?;
        body.parse()
            .map_err(|_| DriftError::InvalidAddress(truncate(&body)))
    }

    /// Fetch one endpoint and return the trimmed body
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "detection request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DriftError::Http(format!(
                "echo endpoint answered {status}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DriftError::Http(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

/// Keep garbage bodies loggable without flooding the log
fn truncate(body: &str) -> String {
    body.chars().take(64).collect()
}
