use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::error::{DriftError, Result};
use crate::types::model::RecordType;

/// Response envelope wrapped around every provider endpoint.
///
/// The provider signals failure two ways: a non-2xx status, or a 2xx body
/// with `success` set to false. The HTTP layer handles the former; this
/// type handles the latter.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the provider accepted the operation
    pub success: bool,

    /// Machine-readable errors, present on failure
    #[serde(default)]
    pub errors: Vec<ApiMessage>,

    /// Informational messages
    #[serde(default)]
    pub messages: Vec<ApiMessage>,

    /// Endpoint-specific payload, present on success. Missing and null
    /// both deserialize as absent, with no bound pushed onto `T`.
    pub result: Option<T>,
}

/// One coded message in a provider response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    /// Provider-assigned numeric code
    #[serde(default)]
    pub code: i64,
    /// Human-readable text
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Fail when the provider flagged the operation unsuccessful.
    pub fn ensure_success(&self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(DriftError::Rejected(self.error_summary()))
        }
    }

    /// Unwrap the payload of a successful response.
    pub fn into_result(self) -> Result<T> {
        self.ensure_success()?;
        self.result
            .ok_or_else(|| DriftError::Rejected(String::from("success with empty result")))
    }

    /// Render the provider's errors for logging.
    #[must_use]
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::from("no error detail supplied");
        }
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One zone as returned by the zone listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    /// Provider-side zone identifier
    pub id: String,
    /// Zone name, compared exactly against the configured domain
    pub name: String,
}

/// One DNS record as returned by the record listing.
///
/// The listing carries every record type the zone holds; `record_type`
/// stays a plain string so TXT, MX and friends parse losslessly and are
/// simply never matched.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRecord {
    /// Provider-side record identifier
    pub id: String,
    /// Fully qualified record name
    pub name: String,
    /// Record type spelling, e.g. "A", "AAAA", "TXT"
    #[serde(rename = "type")]
    pub record_type: String,
    /// Current record content, unused by resolution
    #[serde(default)]
    pub content: Option<String>,
}

impl ZoneRecord {
    /// Returns true if this record is the given family's record for `fqdn`
    #[must_use]
    pub fn matches(&self, fqdn: &str, record_type: RecordType) -> bool {
        self.name == fqdn && self.record_type == record_type.as_str()
    }
}

/// PUT body for a record update.
#[derive(Debug, Clone, Serialize)]
pub struct RecordUpdate<'a> {
    /// Record identifier being rewritten
    pub id: &'a str,
    /// Record family
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Fully qualified record name
    pub name: &'a str,
    /// Address to publish
    pub content: IpAddr,
    /// TTL in seconds
    pub ttl: u32,
}
