use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to the Discord webhook.
///
/// Every webhook call is a single attempt bounded by the configured timeout.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Discord did not answer before the deadline. Results in 504 Gateway Timeout.
    #[error("Discord webhook request timed out")]
    Timeout,

    /// Connection or protocol failure. Results in 502 Bad Gateway.
    #[error("Discord webhook request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Discord answered with a non-success status. Results in 502 Bad Gateway.
    #[error("Discord webhook responded with status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status returned by Discord
        status: u16,
        /// First bytes of the response body
        body: String,
    },

    /// The configured webhook URL cannot be turned into a request URL.
    #[error("Invalid Discord webhook URL: {0}")]
    InvalidWebhookUrl(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        match self {
            Self::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorDto {
                    error: "Discord did not respond in time".to_string(),
                }),
            )
                .into_response(),
            _ => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorDto {
                    error: "Failed to update Discord ticket".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
