//! Error types for BookHarmony services

use anyx_client::ClientError;
use thiserror::Error;

/// Errors surfaced by the collection, friend and lending services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarmonyError {
    /// Query client error bubbling up unchanged
    #[error("Query client error: {0}")]
    Client(#[from] ClientError),

    /// Catalog lookup failed
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Response rows did not match the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Requested record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Operation would duplicate or contradict existing records
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Caller-supplied input was rejected before any query ran
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl HarmonyError {
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for HarmonyError {
    fn from(err: serde_json::Error) -> Self {
        HarmonyError::decode(err.to_string())
    }
}

/// Result type for service operations
pub type HarmonyResult<T> = Result<T, HarmonyError>;
