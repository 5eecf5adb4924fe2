use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID stored in the session.
    #[error("No user is logged in for this session")]
    UserNotInSession,

    /// Session references a user that no longer exists in the database.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(u64),

    /// CSRF state validation failed during OAuth callback.
    ///
    /// The state in the callback URL does not match the token stored in the session,
    /// indicating a potential CSRF attack or a stale login attempt.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Exchanging the authorization code with Discord failed.
    #[error("Failed to exchange OAuth authorization code: {0}")]
    TokenExchangeFailed(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Messages stay generic; the detailed error is logged at debug level.
///
/// # Returns
/// - 401 Unauthorized - No valid user in session
/// - 400 Bad Request - Login flow failures
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not authenticated")
            }
            Self::CsrfValidationFailed | Self::TokenExchangeFailed(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
