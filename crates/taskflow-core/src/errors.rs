//! Error hierarchy for the TaskFlow client.

use thiserror::Error;

/// Errors produced by the API client and the stores built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response from the server, message extracted from the body.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message parsed from the response body.
        message: String,
    },

    /// Transport-level failure (connection, TLS, timeout, decode).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Response body did not have the required shape.
    #[error("{0}")]
    InvalidResponse(String),

    /// Durable-storage I/O failure.
    #[error(transparent)]
    Storage(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A surfaced user-facing failure from a store operation.
    #[error("{message}")]
    Operation {
        /// Best-available human-readable message.
        message: String,
    },
}

impl ApiError {
    /// Collapse this error into a user-facing [`ApiError::Operation`].
    ///
    /// Message precedence: server-reported detail/message, then the
    /// transport error text, then `fallback`.
    #[must_use]
    pub fn surface(self, fallback: &str) -> Self {
        let message = match &self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Http(e) => e.to_string(),
            Self::InvalidResponse(message) | Self::Operation { message } => message.clone(),
            _ => fallback.to_string(),
        };
        Self::Operation { message }
    }

    /// A surfaced failure carrying only a static message.
    #[must_use]
    pub fn operation(message: &str) -> Self {
        Self::Operation {
            message: message.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
