//! Error types for remote calls and client configuration.

use thiserror::Error;

/// Failure reported by a remote task store or authentication gateway.
///
/// Payloads are plain strings so the error stays `Clone` and independent of
/// the transport library.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteCallError {
    /// The bearer credential was missing, expired or rejected.
    #[error("not authenticated")]
    Unauthorized,

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the response body, if any.
        code: Option<String>,
        /// Human-readable message from the response body, or the raw body.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The store refused the call for a reason of its own.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RemoteCallError {
    /// Builds an API error from its parts.
    #[must_use]
    pub fn api(status: u16, code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.map(str::to_owned),
            message: message.into(),
        }
    }

    /// Returns `true` for authentication failures.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the server-provided message for API errors.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type for remote calls.
pub type RemoteResult<T> = Result<T, RemoteCallError>;

/// Errors raised while building client configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The API URL is not an absolute `http` or `https` URL.
    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),

    /// The request timeout is zero or not a number.
    #[error("invalid request timeout '{0}', expected a positive number of seconds")]
    InvalidTimeout(String),

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}
