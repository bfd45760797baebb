//! Envelope validation.
//!
//! Every response decodes to `{ success, message?, ...payload }`. A failing
//! status and `success: false` are both failures, and the expiry signal is
//! recognized here once so the executor only has to look at the kind.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, EXPIRY_SIGNAL};
use crate::transport::TransportResponse;

/// Classify a raw response and return the decoded envelope on success.
pub fn check_response(response: TransportResponse) -> Result<Value, ApiError> {
    let body: Value = serde_json::from_slice(&response.body)?;

    if !response.is_ok() || is_unsuccessful(&body) {
        return Err(rejection(response, body));
    }

    Ok(body)
}

/// [`check_response`] followed by decoding into the endpoint's payload type.
pub fn decode<T: DeserializeOwned>(response: TransportResponse) -> Result<T, ApiError> {
    let body = check_response(response)?;
    Ok(serde_json::from_value(body)?)
}

fn is_unsuccessful(body: &Value) -> bool {
    matches!(body.get("success"), Some(Value::Bool(false)))
}

fn rejection(response: TransportResponse, body: Value) -> ApiError {
    if body.get("message").and_then(Value::as_str) == Some(EXPIRY_SIGNAL) {
        return ApiError::expired(response.status, body);
    }
    ApiError::rejected(response.status, body)
}
