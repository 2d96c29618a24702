//! API errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Message used when an error response carries no usable `message`.
pub const NO_DETAILS: &str = "No details provided";

/// Errors raised while talking to the inventory API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. Displays as the server's
    /// message alone so it can be shown to the user verbatim.
    #[error("{message}")]
    Request {
        /// Response status
        status: StatusCode,

        /// Server-supplied message, or [`NO_DETAILS`].
        message: String,
    },

    /// The request never produced a response (server unreachable, reset, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response body did not decode into the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// An extra header had an invalid name or value.
    #[error("invalid header `{0}`")]
    Header(String),
}

impl ApiError {
    /// HTTP status for request errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Network(error) => error.status(),
            ApiError::Decode(_) | ApiError::Encode(_) | ApiError::Header(_) => None,
        }
    }
}
