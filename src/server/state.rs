//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database handle and HTTP client
//! share their pools, and the configuration sits behind an `Arc`.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    model::moderation::ModerationAccess,
    service::{discord_bridge::DiscordWebhookBridge, moderation_token::ModerationTokenIssuer},
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// HTTP client for Discord API calls. Does not follow redirects.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// Webhook bridge mirroring applications as Discord tickets.
    pub bridge: DiscordWebhookBridge,

    pub token_issuer: ModerationTokenIssuer,

    /// Policy and allow-list checked when a moderation link is followed.
    pub moderation_access: ModerationAccess,

    pub config: Arc<Config>,
}

impl AppState {
    /// Creates the application state.
    ///
    /// The token issuer and moderation access are derived from `config`.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external API requests
    /// - `oauth_client` - OAuth2 client for Discord authentication
    /// - `bridge` - Discord webhook bridge
    /// - `config` - Immutable application configuration
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        bridge: DiscordWebhookBridge,
        config: Config,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            bridge,
            token_issuer: ModerationTokenIssuer::new(config.rp_token_bytes),
            moderation_access: ModerationAccess::new(
                config.rp_moderation_policy,
                config.rp_moderators.clone(),
            ),
            config: Arc::new(config),
        }
    }
}
