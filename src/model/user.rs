use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::rp_application::RpApplicationSummaryDto;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Discord user ID as a string to avoid precision loss in JavaScript.
    pub id: String,
    pub username: String,
    /// Global display name, falling back to the username.
    pub display_name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub linked_minecraft: Option<String>,
    pub rp_first_name: Option<String>,
    pub rp_last_name: Option<String>,
    pub minecraft_verified_at: Option<DateTime<Utc>>,
    /// Site page showing the public profile of this user.
    pub profile_url: String,
}

/// Response of `GET /api/auth/me`.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeDto {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rp_application: Option<RpApplicationSummaryDto>,
}

impl MeDto {
    /// Body returned when nobody is logged in.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
            rp_application: None,
        }
    }
}

/// What anyone may see about a user, without contact details.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileDto {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_minecraft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rp_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rp_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

/// Response of `GET /api/profiles/{discord_id}`.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PublicProfileResponseDto {
    pub profile: PublicProfileDto,
}
