//! Minecraft verification code models.

use chrono::{DateTime, Utc};

use crate::{
    model::verification::VerificationCodeResponseDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// One-time code proving that a Discord user controls a Minecraft nickname.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationCode {
    pub id: i32,
    pub code: String,
    /// Owner of the accepted application the code was issued for.
    pub discord_id: u64,
    pub nickname: String,
    pub application_id: i32,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn from_entity(entity: entity::verification_code::Model) -> Result<Self, AppError> {
        let discord_id = parse_u64_from_string(entity.discord_id)?;

        Ok(Self {
            id: entity.id,
            code: entity.code,
            discord_id,
            nickname: entity.nickname,
            application_id: entity.application_id,
            used: entity.used,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateVerificationCodeParam {
    pub code: String,
    pub discord_id: u64,
    pub nickname: String,
    pub application_id: i32,
    pub expires_at: DateTime<Utc>,
}

/// Answer to a game server code request.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationCodeOutcome {
    /// The owner already linked this nickname.
    AlreadyVerified,
    /// Code the player must type on the site.
    Issued(VerificationCode),
}

impl VerificationCodeOutcome {
    pub fn into_dto(self) -> VerificationCodeResponseDto {
        match self {
            Self::AlreadyVerified => VerificationCodeResponseDto::AlreadyVerified {
                already_verified: true,
            },
            Self::Issued(code) => VerificationCodeResponseDto::Code {
                code: code.code,
                expires_at: code.expires_at,
            },
        }
    }
}
