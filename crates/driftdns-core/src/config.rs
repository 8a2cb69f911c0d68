//! Daemon configuration for driftdns.

use serde::{Deserialize, Serialize};

use crate::error::{DriftError, Result};

/// Top-level configuration for a driftdns daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between reconciliation cycles.
    pub interval: u64,

    /// Provider credentials used on every API request.
    pub user: Credentials,

    /// Public-address detection endpoints (default: icanhazip).
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Domains to reconcile, in the order they are attempted.
    #[serde(default)]
    pub domains: Vec<DomainConfig>,
}

/// Account credentials for the DNS provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email, sent as `X-Auth-Email`.
    pub email: String,

    /// Account API key, sent as `X-Auth-Key`.
    pub api_key: String,
}

/// Where to ask for the machine's public addresses.
///
/// Each endpoint must answer a plain-text body containing one address of
/// the matching family. The defaults are family-pinned so that a dual-stack
/// machine cannot receive a v6 answer on the v4 lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// IPv4 echo endpoint (default: ipv4.icanhazip.com).
    #[serde(default = "default_ipv4_url")]
    pub ipv4_url: String,

    /// IPv6 echo endpoint (default: ipv6.icanhazip.com).
    #[serde(default = "default_ipv6_url")]
    pub ipv6_url: String,
}

/// One managed domain and the host labels under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Zone name as registered at the provider, matched exactly.
    pub name: String,

    /// Host labels; the managed record name is `<label>.<name>`.
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            ipv4_url: default_ipv4_url(),
            ipv6_url: default_ipv6_url(),
        }
    }
}

impl Config {
    /// Check the startup-fatal rules.
    ///
    /// Credentials and the interval are the only fields that abort startup.
    /// A blank domain name or host label is left in place; the engine
    /// reports and skips it every cycle instead.
    pub fn validate(&self) -> Result<()> {
        if self.user.email.trim().is_empty() {
            return Err(DriftError::Config(String::from(
                "user.email must not be blank",
            )));
        }
        if self.user.api_key.trim().is_empty() {
            return Err(DriftError::Config(String::from(
                "user.api_key must not be blank",
            )));
        }
        if self.interval == 0 {
            return Err(DriftError::Config(String::from(
                "interval must be at least 1 second",
            )));
        }
        Ok(())
    }

    /// Total number of host labels across all domains.
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.domains.iter().map(|d| d.hosts.len()).sum()
    }
}

// Default value functions for serde.
fn default_ipv4_url() -> String {
    String::from("https://ipv4.icanhazip.com")
}

fn default_ipv6_url() -> String {
    String::from("https://ipv6.icanhazip.com")
}
