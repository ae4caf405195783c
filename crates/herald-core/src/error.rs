//! Error types for the Herald console.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder shown when the backend answered with an empty error body.
pub const EMPTY_BODY: &str = "<empty>";

/// A shared error type for the entire console.
///
/// The first four variants mirror what can go wrong talking to the backend;
/// the rest are local to the console.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeraldError {
    /// The backend could not be reached at all (refused, DNS, reset).
    #[error("Backend unreachable: {message}")]
    Unreachable { message: String },

    /// A call exceeded its time bound.
    #[error("{operation} timed out after {timeout_ms} ms")]
    Timeout {
        operation: String,
        timeout_ms: u64,
    },

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    BadResponse { status: u16, body: String },

    /// The backend answered successfully but the body could not be decoded.
    #[error("Undecodable backend response: {message}")]
    Decode { message: String },

    /// Locally detected draft problems.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Console settings error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A chosen local attachment could not be used.
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl HeraldError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Unreachable error
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a BadResponse error, normalizing a blank body to [`EMPTY_BODY`].
    pub fn bad_response(status: u16, body: impl AsRef<str>) -> Self {
        let trimmed = body.as_ref().trim();
        let body = if trimmed.is_empty() {
            EMPTY_BODY.to_string()
        } else {
            trimmed.to_string()
        };
        Self::BadResponse { status, body }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Attachment error
    pub fn attachment(message: impl Into<String>) -> Self {
        Self::Attachment(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// True for both non-success statuses and undecodable bodies.
    pub fn is_bad_response(&self) -> bool {
        matches!(self, Self::BadResponse { .. } | Self::Decode { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text shown to the operator.
    ///
    /// For a backend rejection this is the backend's own body, verbatim.
    pub fn operator_message(&self) -> String {
        match self {
            Self::BadResponse { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HeraldError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HeraldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HeraldError>`.
pub type Result<T> = std::result::Result<T, HeraldError>;
