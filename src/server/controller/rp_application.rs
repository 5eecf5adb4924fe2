use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        rp_application::{
            LatestRpApplicationDto, SubmitRpApplicationDto, SubmitRpApplicationResponseDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::rp_application::{RpApplication, RpApplicationFields},
        service::rp_application::RpApplicationService,
        state::AppState,
        util::{html::render_moderation_page, parse::parse_path_id},
    },
};

pub static RP_APPLICATION_TAG: &str = "rp_application";

const APPLICATION_NOT_FOUND: &str = "application not found";

/// Query of a moderation link posted in the Discord ticket.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ModerateParams {
    /// `accept`, `cancel` or `reconsider` (`approve` and `reject` are also understood).
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub token: String,
}

fn rp_application_service(state: &AppState) -> RpApplicationService<'_> {
    RpApplicationService::new(
        &state.db,
        &state.bridge,
        &state.token_issuer,
        &state.moderation_access,
    )
}

#[utoipa::path(
    post,
    path = "/api/rp/applications",
    tag = RP_APPLICATION_TAG,
    request_body = SubmitRpApplicationDto,
    responses(
        (status = 201, description = "Application stored and posted to Discord", body = SubmitRpApplicationResponseDto),
        (status = 400, description = "Invalid application fields", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 409, description = "User already has a pending or accepted application", body = ErrorDto),
        (status = 502, description = "Discord webhook rejected the ticket", body = ErrorDto),
        (status = 504, description = "Discord webhook timed out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_application(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubmitRpApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let application = rp_application_service(&state)
        .submit(user.discord_id, RpApplicationFields::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitRpApplicationResponseDto {
            status: "ok".to_string(),
            application_id: application.id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/rp/applications/{id}/moderate",
    tag = RP_APPLICATION_TAG,
    params(
        ("id" = i32, Path, description = "RP application ID"),
        ModerateParams
    ),
    responses(
        (status = 200, description = "Confirmation page", content_type = "text/html", body = String),
        (status = 400, description = "Unknown moderation action", body = ErrorDto),
        (status = 401, description = "Missing or wrong token, or moderator login required", body = ErrorDto),
        (status = 403, description = "Logged-in user is not a moderator", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 502, description = "Status saved but the Discord ticket edit failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn moderate_application(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(params): Query<ModerateParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_path_id(&id, APPLICATION_NOT_FOUND)?;
    let caller = AuthGuard::new(&state.db, &session)
        .current_user()
        .await?
        .map(|user| user.discord_id);

    let outcome = rp_application_service(&state)
        .act_on_link(id, &params.action, &params.token, caller)
        .await?;

    Ok(render_moderation_page(&outcome))
}

#[utoipa::path(
    delete,
    path = "/api/rp/applications/{id}",
    tag = RP_APPLICATION_TAG,
    params(
        ("id" = i32, Path, description = "RP application ID")
    ),
    responses(
        (status = 200, description = "Application deleted", body = StatusDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Application belongs to another user", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 409, description = "Accepted applications cannot be deleted", body = ErrorDto),
        (status = 502, description = "Discord ticket could not be removed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_application(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;
    let id = parse_path_id(&id, APPLICATION_NOT_FOUND)?;

    rp_application_service(&state)
        .delete(user.discord_id, id)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}

#[utoipa::path(
    get,
    path = "/api/rp/applications/latest",
    tag = RP_APPLICATION_TAG,
    responses(
        (status = 200, description = "Latest application of the user, if any", body = LatestRpApplicationDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_latest_application(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let application = rp_application_service(&state)
        .latest_summary(user.discord_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(LatestRpApplicationDto {
            application: application.map(RpApplication::into_summary_dto),
        }),
    ))
}
