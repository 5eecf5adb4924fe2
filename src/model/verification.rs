use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Game server request for a verification code.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RequestVerificationCodeDto {
    pub nickname: String,
}

/// Either a code for the player to type on the site, or a marker that the nickname is
/// already linked to its owner.
#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
#[serde(untagged)]
pub enum VerificationCodeResponseDto {
    #[serde(rename_all = "camelCase")]
    AlreadyVerified { already_verified: bool },
    #[serde(rename_all = "camelCase")]
    Code {
        code: String,
        expires_at: DateTime<Utc>,
    },
}

/// Code typed by the player on the site.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeDto {
    pub code: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeResponseDto {
    pub status: String,
    pub nickname: String,
}

/// Game server update of a linked player's RP name.
#[derive(Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRpNameDto {
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
}
