use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        verification::{
            RequestVerificationCodeDto, UpdateRpNameDto, VerificationCodeResponseDto,
            VerifyCodeDto, VerifyCodeResponseDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            auth::AuthGuard,
            server_token::{ServerTokenGuard, ServerTokenQuery},
        },
        model::user::UpdateRpNameParam,
        service::verification::VerificationService,
        state::AppState,
    },
};

pub static VERIFICATION_TAG: &str = "minecraft";

#[utoipa::path(
    post,
    path = "/api/minecraft/verification-code",
    tag = VERIFICATION_TAG,
    params(
        ("x-server-token" = Option<String>, Header, description = "Shared game server token"),
        ServerTokenQuery
    ),
    request_body = RequestVerificationCodeDto,
    responses(
        (status = 200, description = "Code to show the player, or already verified", body = VerificationCodeResponseDto),
        (status = 400, description = "Invalid nickname", body = ErrorDto),
        (status = 401, description = "Invalid server token", body = ErrorDto),
        (status = 404, description = "No accepted application for this nickname", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_verification_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(token): Query<ServerTokenQuery>,
    Json(payload): Json<RequestVerificationCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    ServerTokenGuard::new(state.config.minecraft_server_token.as_deref())
        .require(&headers, &token)?;

    let outcome = VerificationService::new(&state.db)
        .request_code(&payload.nickname)
        .await?;

    Ok((StatusCode::OK, Json(outcome.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/minecraft/verify",
    tag = VERIFICATION_TAG,
    request_body = VerifyCodeDto,
    responses(
        (status = 200, description = "Nickname linked to the account", body = VerifyCodeResponseDto),
        (status = 400, description = "Code malformed, unknown, used or expired", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Code was issued to another account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_code(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<VerifyCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require().await?;

    let nickname = VerificationService::new(&state.db)
        .verify(user.discord_id, &payload.code)
        .await?;

    Ok((
        StatusCode::OK,
        Json(VerifyCodeResponseDto {
            status: "ok".to_string(),
            nickname,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/minecraft/rp-name",
    tag = VERIFICATION_TAG,
    params(
        ("x-server-token" = Option<String>, Header, description = "Shared game server token"),
        ServerTokenQuery
    ),
    request_body = UpdateRpNameDto,
    responses(
        (status = 200, description = "RP name updated", body = StatusDto),
        (status = 400, description = "Neither first nor last name given", body = ErrorDto),
        (status = 401, description = "Invalid server token", body = ErrorDto),
        (status = 404, description = "No user linked to this nickname", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_rp_name(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(token): Query<ServerTokenQuery>,
    Json(payload): Json<UpdateRpNameDto>,
) -> Result<impl IntoResponse, AppError> {
    ServerTokenGuard::new(state.config.minecraft_server_token.as_deref())
        .require(&headers, &token)?;

    VerificationService::new(&state.db)
        .update_rp_name(UpdateRpNameParam {
            nickname: payload.nickname,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::ok())))
}
