use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::model::api::StatusDto;

pub static HEALTH_TAG: &str = "health";

#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Server is up", body = StatusDto)
    ),
)]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(StatusDto::ok()))
}
