use thiserror::Error;

/// Result type alias for driftdns operations
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that can occur while reconciling DNS records
#[derive(Error, Debug)]
pub enum DriftError {
    /// Authentication failed - invalid or missing credentials
    #[error("authentication failed: provider rejected credentials")]
    Unauthorized,

    /// Provider returned a non-success HTTP status
    #[error("provider error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the provider
        message: String,
    },

    /// Provider answered 2xx but flagged the operation as unsuccessful
    #[error("provider rejected operation: {0}")]
    Rejected(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No zone with the configured name exists at the provider
    #[error("zone not found: {0}")]
    ZoneNotFound(String),

    /// A detection endpoint returned something that is not an address
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DriftError {
    /// Returns true if the error is transient and worth retrying on a later cycle
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this error carries one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
