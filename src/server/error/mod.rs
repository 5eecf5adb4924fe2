//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by controllers, services and repositories.
//! It wraps the domain-specific error enums and implements `IntoResponse`, mapping each
//! variant to a status code and an `ErrorDto` JSON body. Variants that indicate a server
//! fault are logged in full and answered with a generic message.

pub mod auth;
pub mod bridge;
pub mod config;
pub mod internal;
pub mod storage;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, bridge::BridgeError, config::ConfigError, internal::InternalError,
        storage::StorageError,
    },
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error, mapped by `AuthError::into_response()`.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Discord webhook failure, mapped to 502 or 504 by `BridgeError::into_response()`.
    #[error(transparent)]
    BridgeErr(#[from] BridgeError),

    /// Persisted data that cannot be decoded into a domain model.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Unexpected internal failure such as an unparsable stored ID.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx error, raised by the session store.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Listener or server I/O failure during startup.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Invalid input. Results in 400 Bad Request.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credentials. Results in 401 Unauthorized.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed. Results in 403 Forbidden.
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found. Results in 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with the current state. Results in 409 Conflict.
    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    fn client_error(status: StatusCode, message: String) -> Response {
        (status, Json(ErrorDto { error: message })).into_response()
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `Validation`
/// - 401 Unauthorized - `Unauthorized`
/// - 403 Forbidden - `Forbidden`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`
/// - Variable - `AuthErr` and `BridgeErr` delegate to their own conversions
/// - 500 Internal Server Error - every other variant
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::BridgeErr(err) => err.into_response(),
            Self::Validation(msg) => Self::client_error(StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => Self::client_error(StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => Self::client_error(StatusCode::FORBIDDEN, msg),
            Self::NotFound(msg) => Self::client_error(StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => Self::client_error(StatusCode::CONFLICT, msg),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged; the client only receives "Internal server error".
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
