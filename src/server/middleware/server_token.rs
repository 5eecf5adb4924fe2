//! Shared-secret check for calls made by the Minecraft server.

use axum::http::HeaderMap;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use utoipa::IntoParams;

use crate::server::error::AppError;

pub const SERVER_TOKEN_HEADER: &str = "x-server-token";

/// Optional `?token=` fallback for game server plugins that cannot set headers.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServerTokenQuery {
    pub token: Option<String>,
}

pub struct ServerTokenGuard<'a> {
    expected: Option<&'a str>,
}

impl<'a> ServerTokenGuard<'a> {
    /// # Arguments
    /// - `expected` - Configured server token; `None` rejects every call
    pub fn new(expected: Option<&'a str>) -> Self {
        Self { expected }
    }

    /// Checks the token from the `X-Server-Token` header, falling back to the query.
    ///
    /// # Returns
    /// - `Ok(())` - Token matches
    /// - `Err(AppError::Unauthorized)` - Token missing, wrong, or not configured
    pub fn require(&self, headers: &HeaderMap, query: &ServerTokenQuery) -> Result<(), AppError> {
        let provided = headers
            .get(SERVER_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .or(query.token.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        let matches = match self.expected {
            Some(expected) if !expected.is_empty() && !provided.is_empty() => {
                bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
            }
            _ => false,
        };

        if !matches {
            return Err(AppError::Unauthorized("invalid server token".to_string()));
        }

        Ok(())
    }
}
