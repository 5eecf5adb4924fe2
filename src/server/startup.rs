//! One-time initialization of the resources held in `AppState`.

use axum::http::{header, HeaderValue, Method};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    model::moderation::ModerationLinkPolicy,
    service::discord_bridge::DiscordWebhookBridge,
    state::OAuth2Client,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions expire after 7 days of inactivity. The cookie uses `SameSite=Lax` so that it is
/// sent on the redirect back from Discord, and is marked secure when the API is served over
/// https.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let session = SessionManagerLayer::new(session_store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}

/// Builds the shared HTTP client.
///
/// Redirects are disabled to avoid SSRF through redirecting endpoints, and every request is
/// bounded by the configured external timeout.
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.external_timeout)
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorize, token and redirect URLs set
/// - `Err(AppError::ConfigErr(InvalidEnvVar))` - One of the URLs is malformed
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str| {
        let name = name.to_string();
        move |err: oauth2::url::ParseError| ConfigError::InvalidEnvVar {
            name,
            reason: err.to_string(),
        }
    };

    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(config.discord_auth_url.clone()).map_err(invalid("DISCORD_AUTH_URL"))?,
        )
        .set_token_uri(
            TokenUrl::new(config.discord_token_url.clone())
                .map_err(invalid("DISCORD_TOKEN_URL"))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(config.discord_redirect_url.clone())
                .map_err(invalid("DISCORD_REDIRECT_URL"))?,
        );

    Ok(client)
}

pub fn setup_discord_bridge(
    config: &Config,
    http_client: &reqwest::Client,
) -> DiscordWebhookBridge {
    if config.rp_webhook_url.is_none() {
        tracing::warn!("DISCORD_RP_WEBHOOK is not set, RP tickets will not be posted to Discord");
    }

    DiscordWebhookBridge::new(
        http_client.clone(),
        config.rp_webhook_url.clone(),
        config.app_url.clone(),
        config.external_timeout,
    )
}

/// Warns when no one would be able to follow a moderation link.
pub fn check_for_moderators(config: &Config) {
    if config.rp_moderation_policy == ModerationLinkPolicy::TokenAndModerator
        && config.rp_moderators.is_empty()
    {
        tracing::warn!(
            "DISCORD_RP_MODERATOR_IDS is empty, every moderation link will be refused"
        );
    }
}

/// Allows the frontend origin to call the API with its session cookie.
pub fn setup_cors(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(&config.frontend_url).map_err(|err| {
        ConfigError::InvalidEnvVar {
            name: "FRONTEND_URL".to_string(),
            reason: err.to_string(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true))
}
