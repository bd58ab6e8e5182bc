use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// The `{ success, data, message }` wrapper every response uses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Decode a successful response body into its `data` payload.
///
/// A missing `success` flag counts as success. Missing `data` is only accepted
/// when `T` itself can be built from `null` (unit, `Option`).
///
/// # Errors
///
/// Returns `ApiError::Rejected` for `success: false`, `ApiError::MissingData`
/// when `data` is absent, and `ApiError::Decode` for malformed bodies.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let envelope: Envelope<T> = serde_json::from_str(body)?;

    if envelope.success == Some(false) {
        return Err(ApiError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request was not successful".into()),
        ));
    }

    match envelope.data {
        Some(data) => Ok(data),
        None => serde_json::from_value(serde_json::Value::Null).map_err(|_| ApiError::MissingData),
    }
}

/// Best-effort extraction of the server's `message` from an error body.
#[must_use]
pub fn envelope_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct MessageOnly {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }

    serde_json::from_str::<MessageOnly>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .filter(|message| !message.trim().is_empty())
}
