//! Response unwrapping.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiError, errors::NO_DETAILS};

/// Extract the user-facing message from an error response body.
///
/// Uses the body's `message` when it is a non-empty string, a non-zero
/// number or `true`, and [`NO_DETAILS`] for anything else.
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(message_text)
        .unwrap_or_else(|| NO_DETAILS.to_string())
}

fn message_text(message: &Value) -> Option<String> {
    match message {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64().is_some_and(|value| value.abs() > 0.0) => {
            Some(number.to_string())
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Turn a status and body into the decoded payload or a request error.
///
/// # Errors
///
/// Returns [`ApiError::Request`] for non-2xx statuses and
/// [`ApiError::Decode`] when a 2xx body is not the expected JSON.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    ensure_success(status, body)?;

    serde_json::from_slice(body).map_err(ApiError::Decode)
}

/// Like [`decode_response`] but ignores the body of a 2xx response.
///
/// # Errors
///
/// Returns [`ApiError::Request`] for non-2xx statuses.
pub fn ensure_success(status: StatusCode, body: &[u8]) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }

    Err(ApiError::Request {
        status,
        message: error_message(body),
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    debug!(%status, bytes = body.len(), "received response");

    decode_response(status, &body)
}

pub(crate) async fn read_empty(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    debug!(%status, bytes = body.len(), "received response");

    ensure_success(status, &body)
}
