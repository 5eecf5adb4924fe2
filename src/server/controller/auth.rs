use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        user::MeDto,
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession},
        service::{auth::DiscordAuthService, user::UserService},
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Query parameters Discord appends when redirecting back after login.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// CSRF state token, compared against the value stored at login.
    pub state: String,
    /// Authorization code exchanged for an access token.
    pub code: String,
}

#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to the Discord authorize page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.config.discord_user_url,
    );

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 303, description = "Logged in, redirect to the site"),
        (status = 400, description = "CSRF mismatch or refused authorization code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let auth_service = DiscordAuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.config.discord_user_url,
    );
    let user = auth_service.callback(params.code).await?;

    AuthSession::new(&session)
        .set_user_id(user.discord_id)
        .await?;

    Ok(Redirect::to(&state.config.frontend_url))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session cleared", body = StatusDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user and latest application, or anonymous", body = MeDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let Some(user_id) = AuthSession::new(&session).get_user_id().await? else {
        return Ok((StatusCode::OK, Json(MeDto::anonymous())));
    };

    let dto = UserService::new(&state.db)
        .get_profile(user_id)
        .await?
        .map(|profile| profile.into_me_dto(&state.config.frontend_url))
        .unwrap_or_else(MeDto::anonymous);

    Ok((StatusCode::OK, Json(dto)))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match stored_state {
        Some(stored) if stored == csrf_state => Ok(()),
        _ => Err(AppError::AuthErr(AuthError::CsrfValidationFailed)),
    }
}
