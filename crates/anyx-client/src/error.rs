//! Error types for the Anyx query client
//!
//! Every failure a query dispatch can produce is classified into one of the
//! variants below. The client never retries: each error is surfaced to the
//! caller exactly once, after at most one transport attempt.

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// User-safe message attached to transport-level failures. The underlying
/// cause is logged, never surfaced to callers.
pub const CONNECTIVITY_MESSAGE: &str = "unable to reach the server, check connectivity";

/// Failures surfaced by query execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A required configuration value (base URL or project id) is missing.
    /// Raised before any network activity.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The proxy rejected the session credential (HTTP 401/403). The stored
    /// session has already been cleared and subscribers notified.
    #[error("Session expired")]
    SessionExpired,

    /// The proxy rejected the request itself (4xx other than 401/403)
    #[error("Query rejected ({status}): {message}")]
    ClientQuery { status: u16, message: String },

    /// The proxy failed while handling the request (5xx)
    #[error("Server error ({status}): {message}")]
    ServerQuery { status: u16, message: String },

    /// The request never completed at the transport level
    #[error("Network error: {message}")]
    Network { message: String },

    /// A response or session record could not be (de)serialized
    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        ClientError::Configuration {
            message: message.into(),
        }
    }

    /// Create a client-class query error
    pub fn client_query(status: u16, message: impl Into<String>) -> Self {
        ClientError::ClientQuery {
            status,
            message: message.into(),
        }
    }

    /// Create a server-class query error
    pub fn server_query(status: u16, message: impl Into<String>) -> Self {
        ClientError::ServerQuery {
            status,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode {
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, when one applies
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ClientQuery { status, .. } | ClientError::ServerQuery { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::decode(err.to_string())
    }
}
