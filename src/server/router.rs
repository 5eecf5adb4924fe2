use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth::{self, AUTH_TAG},
        health::{self, HEALTH_TAG},
        profile::{self, PROFILE_TAG},
        rp_application::{self, RP_APPLICATION_TAG},
        verification::{self, VERIFICATION_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "rpboard",
        description = "Discord login, RP applications moderated from Discord, and Minecraft account linking"
    ),
    tags(
        (name = HEALTH_TAG, description = "Liveness"),
        (name = AUTH_TAG, description = "Discord login and session"),
        (name = PROFILE_TAG, description = "Public user profiles"),
        (name = RP_APPLICATION_TAG, description = "RP application submission and moderation"),
        (name = VERIFICATION_TAG, description = "Minecraft account verification, called by the game server and the site")
    )
)]
struct ApiDoc;

/// Builds the API router with Swagger UI served at `/api/docs`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::me))
        .routes(routes!(profile::get_public_profile))
        .routes(routes!(rp_application::submit_application))
        .routes(routes!(rp_application::get_latest_application))
        .routes(routes!(rp_application::moderate_application))
        .routes(routes!(rp_application::delete_application))
        .routes(routes!(verification::request_verification_code))
        .routes(routes!(verification::verify_code))
        .routes(routes!(verification::update_rp_name))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
