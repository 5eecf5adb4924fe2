use std::time::Duration;

use url::Url;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::moderation::{ModerationLinkPolicy, ModeratorAllowList},
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_USER_URL: &str = "https://discord.com/api/users/@me";

const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_BYTES: usize = 20;
const MIN_TOKEN_BYTES: usize = 16;
const DEFAULT_EXTERNAL_TIMEOUT_SECS: u64 = 5;

/// Application configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_user_url: String,

    /// Public base URL of this API, used in moderation links.
    pub app_url: String,
    /// Site origin allowed by CORS and targeted by the post-login redirect.
    pub frontend_url: String,
    pub bind_addr: String,

    /// Discord webhook receiving RP tickets. `None` disables the bridge.
    pub rp_webhook_url: Option<Url>,
    pub rp_moderators: ModeratorAllowList,
    pub rp_moderation_policy: ModerationLinkPolicy,
    pub rp_token_bytes: usize,

    /// Deadline applied to every outbound HTTP call.
    pub external_timeout: Duration,

    /// Shared secret of the Minecraft server. `None` rejects all game server calls.
    pub minecraft_server_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Values are trimmed and empty values count as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable by name
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and every value valid
    /// - `Err(AppError::ConfigErr(MissingEnvVar))` - A required variable is unset
    /// - `Err(AppError::ConfigErr(InvalidEnvVar))` - A value cannot be parsed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |name: &str| get(name).ok_or(ConfigError::MissingEnvVar(name.to_string()));

        let app_url = get("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string());
        let frontend_url = get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());
        parse_url("APP_URL", &app_url)?;
        parse_url("FRONTEND_URL", &frontend_url)?;

        let rp_webhook_url = get("DISCORD_RP_WEBHOOK")
            .map(|raw| parse_url("DISCORD_RP_WEBHOOK", &raw))
            .transpose()?;

        let rp_moderators = match get("DISCORD_RP_MODERATOR_IDS") {
            Some(raw) => ModeratorAllowList::parse(&raw)
                .map_err(|reason| invalid("DISCORD_RP_MODERATOR_IDS", reason))?,
            None => ModeratorAllowList::default(),
        };

        let rp_moderation_policy = match get("RP_MODERATION_POLICY") {
            Some(raw) => raw
                .parse::<ModerationLinkPolicy>()
                .map_err(|reason| invalid("RP_MODERATION_POLICY", reason))?,
            None => ModerationLinkPolicy::default(),
        };

        let rp_token_bytes = match get("RP_TOKEN_BYTES") {
            Some(raw) => {
                let bytes = raw
                    .parse::<usize>()
                    .map_err(|e| invalid("RP_TOKEN_BYTES", e.to_string()))?;
                if bytes < MIN_TOKEN_BYTES {
                    return Err(invalid(
                        "RP_TOKEN_BYTES",
                        format!("must be at least {}", MIN_TOKEN_BYTES),
                    )
                    .into());
                }
                bytes
            }
            None => DEFAULT_TOKEN_BYTES,
        };

        let external_timeout_secs = match get("EXTERNAL_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| invalid("EXTERNAL_TIMEOUT_SECS", "must be a positive integer"))?,
            None => DEFAULT_EXTERNAL_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: required("DISCORD_REDIRECT_URL")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_user_url: DISCORD_USER_URL.to_string(),
            app_url: app_url.trim_end_matches('/').to_string(),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            rp_webhook_url,
            rp_moderators,
            rp_moderation_policy,
            rp_token_bytes,
            external_timeout: Duration::from_secs(external_timeout_secs),
            minecraft_server_token: get("MINECRAFT_SERVER_TOKEN"),
        })
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| invalid(name, e.to_string()))
}
