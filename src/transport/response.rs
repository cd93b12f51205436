use serde::Deserialize;
use serde_json::Value;

use crate::domain::{ApiResponse, ResponseKind};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

/// Decode a 2xx response body into an [`ApiResponse`].
///
/// The platform wraps errors in an `error` object; a missing code is
/// reported as `-1` with an `Unknown error` message.
pub fn decode_response(kind: ResponseKind, body: &str) -> Result<ApiResponse, TransportError> {
    let data: Value = serde_json::from_str(body)?;
    let envelope: ErrorEnvelope = serde_json::from_value(data.clone()).unwrap_or_default();
    Ok(ApiResponse {
        kind,
        data,
        error_code: envelope.error.code.unwrap_or(-1),
        error_message: envelope
            .error
            .message
            .unwrap_or_else(|| "Unknown error".to_owned()),
    })
}

/// Best-effort extraction of `error.message` from a non-2xx body.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body.trim()).ok()?;
    envelope.error.message
}
