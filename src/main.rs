mod model;
mod server;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, error::AppError, router, scheduler::verification_cleanup,
    service::rp_application::RpApplicationService, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client(&config)?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let bridge = startup::setup_discord_bridge(&config, &http_client);
    let cors = startup::setup_cors(&config)?;
    let bind_addr = config.bind_addr.clone();
    startup::check_for_moderators(&config);

    let state = AppState::new(db, http_client, oauth_client, bridge, config);

    // Tickets posted by an older version may still carry outdated buttons
    match RpApplicationService::new(
        &state.db,
        &state.bridge,
        &state.token_issuer,
        &state.moderation_access,
    )
    .resync_messages()
    .await
    {
        Ok(count) if count > 0 => tracing::info!("Refreshed {} RP tickets on Discord", count),
        Ok(_) => {}
        Err(e) => tracing::error!("Failed to refresh RP tickets on Discord: {}", e),
    }

    let mut scheduler = verification_cleanup::start_scheduler(state.db.clone()).await?;

    let app = router::router()
        .with_state(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
