//! User domain models and parameters.

use chrono::{DateTime, Utc};
use serenity::all::User as DiscordUser;

use crate::{
    model::user::UserDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Site account backed by a Discord identity.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub discord_id: u64,
    pub username: String,
    pub global_name: Option<String>,
    pub email: Option<String>,
    /// Discord avatar hash.
    pub avatar: Option<String>,
    /// Minecraft nickname confirmed through a verification code.
    pub linked_minecraft: Option<String>,
    pub rp_first_name: Option<String>,
    pub rp_last_name: Option<String>,
    pub minecraft_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Global display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.global_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }

    /// Discord CDN URL of the user's avatar.
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            format!(
                "https://cdn.discordapp.com/avatars/{}/{}.png?size=256",
                self.discord_id, hash
            )
        })
    }

    /// Converts to the DTO shown to the user themself.
    ///
    /// # Arguments
    /// - `frontend_url` - Site base URL the profile link points into
    pub fn into_dto(self, frontend_url: &str) -> UserDto {
        UserDto {
            profile_url: profile_url(frontend_url, self.discord_id),
            id: self.discord_id.to_string(),
            display_name: self.display_name().to_string(),
            avatar_url: self.avatar_url(),
            username: self.username,
            email: self.email,
            linked_minecraft: self.linked_minecraft,
            rp_first_name: self.rp_first_name,
            rp_last_name: self.rp_last_name,
            minecraft_verified_at: self.minecraft_verified_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not numeric
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let discord_id = parse_u64_from_string(entity.discord_id)?;

        Ok(Self {
            discord_id,
            username: entity.username,
            global_name: entity.global_name,
            email: entity.email,
            avatar: entity.avatar,
            linked_minecraft: entity.linked_minecraft,
            rp_first_name: entity.rp_first_name,
            rp_last_name: entity.rp_last_name,
            minecraft_verified_at: entity.minecraft_verified_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Link to the public profile page of a user on the site.
///
/// Falls back to a site-relative path when no base URL is known.
pub fn profile_url(frontend_url: &str, discord_id: u64) -> String {
    let base = frontend_url.trim_end_matches('/');
    format!("{}/u/{}", base, discord_id)
}

/// Parameters for upserting a user after Discord login.
///
/// Only identity fields are written; Minecraft link and RP name survive re-login.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub discord_id: u64,
    pub username: String,
    pub global_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl UpsertUserParam {
    /// Builds upsert parameters from the `/users/@me` response.
    pub fn from_discord(user: &DiscordUser) -> Self {
        Self {
            discord_id: user.id.get(),
            username: user.name.clone(),
            global_name: user.global_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.as_ref().map(|hash| hash.to_string()),
        }
    }
}

/// New RP first and last name reported by the game server.
#[derive(Debug, Clone)]
pub struct UpdateRpNameParam {
    /// Linked Minecraft nickname identifying the user.
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
}
