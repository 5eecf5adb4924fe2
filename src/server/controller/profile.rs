use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, user::PublicProfileResponseDto},
    server::{
        error::AppError, service::user::UserService, state::AppState, util::parse::parse_path_id,
    },
};

pub static PROFILE_TAG: &str = "profile";

#[utoipa::path(
    get,
    path = "/api/profiles/{discord_id}",
    tag = PROFILE_TAG,
    params(("discord_id" = String, Path, description = "Discord user ID")),
    responses(
        (status = 200, description = "Public profile of the user", body = PublicProfileResponseDto),
        (status = 404, description = "No user or application for this Discord ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(discord_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let discord_id = parse_path_id(&discord_id, "profile not found")?;

    let profile = UserService::new(&state.db)
        .get_public_profile(discord_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PublicProfileResponseDto {
            profile: profile.into_dto(),
        }),
    ))
}
