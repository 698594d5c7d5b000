//! Response envelope decoding.
//!
//! Every backend response is wrapped as
//! `{ "success": bool, "data": ..., "message": ..., "error": { "code", "message" } }`.
//! Decoding is strict about `data` for calls that return a payload and
//! tolerant of extra fields.

use super::{RemoteCallError, RemoteResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Response envelope returned by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Whether the server considers the call successful.
    #[serde(default)]
    pub success: bool,
    /// Call payload.
    pub data: Option<T>,
    /// Informational message.
    pub message: Option<String>,
    /// Error details for failed calls.
    pub error: Option<ApiErrorBody>,
}

/// Error details carried by a failed response.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: Option<String>,
    /// Human-readable message.
    pub message: Option<String>,
}

/// Decodes the `data` payload of a successful response body.
///
/// # Errors
///
/// Returns [`RemoteCallError::Decode`] when the body is not an envelope,
/// the payload does not match `T`, or `data` is absent.
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> RemoteResult<T> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_slice(body).map_err(|err| RemoteCallError::Decode(err.to_string()))?;
    envelope
        .data
        .ok_or_else(|| RemoteCallError::Decode("response envelope has no data".to_owned()))
}

/// Checks a successful response body that carries no payload.
///
/// Empty bodies are accepted.
///
/// # Errors
///
/// Returns [`RemoteCallError::Decode`] when a non-empty body is not an
/// envelope.
pub fn decode_empty(body: &[u8]) -> RemoteResult<()> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(body)
        .map(|_| ())
        .map_err(|err| RemoteCallError::Decode(err.to_string()))
}

/// Builds the error for a non-success response.
///
/// Uses the envelope's error details when present and falls back to the raw
/// body text otherwise.
#[must_use]
pub fn error_from_body(status: u16, body: &[u8]) -> RemoteCallError {
    let parsed = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(body).ok();
    let details = parsed.and_then(|envelope| {
        envelope
            .error
            .map(|error| (error.code, error.message))
            .or_else(|| envelope.message.map(|message| (None, Some(message))))
    });

    match details {
        Some((code, Some(message))) => RemoteCallError::Api {
            status,
            code,
            message,
        },
        Some((code, None)) => RemoteCallError::Api {
            status,
            code,
            message: String::new(),
        },
        None => RemoteCallError::Api {
            status,
            code: None,
            message: String::from_utf8_lossy(body).trim().to_owned(),
        },
    }
}
