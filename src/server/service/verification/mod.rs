//! Linking Minecraft nicknames to Discord accounts.
//!
//! The game server asks for a code on behalf of a player whose nickname belongs to an
//! accepted application. The player types the code on the site while logged in with the
//! Discord account that owns the application, which links the nickname to that account.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        rp_application::RpApplicationRepository, user::UserRepository,
        verification_code::VerificationCodeRepository,
    },
    error::AppError,
    model::{
        user::UpdateRpNameParam,
        verification_code::{CreateVerificationCodeParam, VerificationCodeOutcome},
    },
    service::rp_application::validation::is_valid_nickname,
};

#[cfg(test)]
mod test;

/// Characters of a verification code. Omits `I`, `O`, `0` and `1`.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const CODE_LENGTH: usize = 8;
const CODE_TTL_MINUTES: i64 = 15;
const MIN_TYPED_CODE_LENGTH: usize = 6;
const MAX_TYPED_CODE_LENGTH: usize = 12;

pub struct VerificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues or reuses a code for the owner of an accepted application.
    ///
    /// # Arguments
    /// - `nickname` - Nickname of the player on the game server
    ///
    /// # Returns
    /// - `Ok(VerificationCodeOutcome::AlreadyVerified)` - Owner already linked this nickname
    /// - `Ok(VerificationCodeOutcome::Issued(code))` - Active code for the player to type
    /// - `Err(AppError::Validation)` - Malformed nickname
    /// - `Err(AppError::NotFound)` - No accepted application or no owner account
    pub async fn request_code(&self, nickname: &str) -> Result<VerificationCodeOutcome, AppError> {
        let nickname = nickname.trim();
        if !is_valid_nickname(nickname) {
            return Err(AppError::Validation("invalid nickname".to_string()));
        }

        let Some(application) = RpApplicationRepository::new(self.db)
            .find_latest_accepted_by_nickname(nickname)
            .await?
        else {
            return Err(AppError::NotFound(
                "accepted rp application not found".to_string(),
            ));
        };

        let Some(owner) = UserRepository::new(self.db)
            .find_by_discord_id(application.discord_id)
            .await?
        else {
            return Err(AppError::NotFound("discord account not found".to_string()));
        };

        if owner
            .linked_minecraft
            .as_deref()
            .is_some_and(|linked| linked.eq_ignore_ascii_case(nickname))
        {
            return Ok(VerificationCodeOutcome::AlreadyVerified);
        }

        let code_repo = VerificationCodeRepository::new(self.db);
        let now = Utc::now();

        if let Some(code) = code_repo
            .find_active_for_owner(owner.discord_id, nickname, now)
            .await?
        {
            return Ok(VerificationCodeOutcome::Issued(code));
        }

        // ThreadRng is not Send, keep it out of the awaited statement.
        let code = generate_code(&mut rand::rng());
        let code = code_repo
            .create(CreateVerificationCodeParam {
                code,
                discord_id: owner.discord_id,
                nickname: nickname.to_string(),
                application_id: application.id,
                expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
            })
            .await?;

        tracing::info!(
            "Issued verification code for nickname {} of user {}",
            nickname,
            owner.discord_id
        );

        Ok(VerificationCodeOutcome::Issued(code))
    }

    /// Consumes a code typed by a logged-in user and links its nickname.
    ///
    /// # Arguments
    /// - `caller` - Discord ID of the logged-in user
    /// - `raw_code` - Code as typed, case-insensitive
    ///
    /// # Returns
    /// - `Ok(String)` - The linked nickname
    /// - `Err(AppError::Validation)` - Malformed, unknown, used or expired code
    /// - `Err(AppError::Forbidden)` - Code was issued to another account
    /// - `Err(AppError::NotFound)` - Caller has no user row
    pub async fn verify(&self, caller: u64, raw_code: &str) -> Result<String, AppError> {
        let code = raw_code.trim().to_ascii_uppercase();
        if !(MIN_TYPED_CODE_LENGTH..=MAX_TYPED_CODE_LENGTH).contains(&code.len()) {
            return Err(AppError::Validation("invalid code".to_string()));
        }

        let code_repo = VerificationCodeRepository::new(self.db);
        let now = Utc::now();

        let Some(verification) = code_repo.find_active_by_code(&code, now).await? else {
            return Err(AppError::Validation(
                "code is invalid or expired".to_string(),
            ));
        };
        if verification.discord_id != caller {
            return Err(AppError::Forbidden(
                "code belongs to another account".to_string(),
            ));
        }

        // Link before consuming so a failed link leaves the code usable
        let linked = UserRepository::new(self.db)
            .link_minecraft(caller, &verification.nickname, now)
            .await?;
        if linked == 0 {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        if code_repo.mark_used(verification.id).await? == 0 {
            tracing::debug!(
                "Verification code {} was consumed concurrently by its owner {}",
                verification.id,
                caller
            );
        }

        tracing::info!(
            "User {} linked Minecraft nickname {}",
            caller,
            verification.nickname
        );

        Ok(verification.nickname)
    }

    /// Stores the in-game RP name of the user linked to a nickname.
    ///
    /// # Returns
    /// - `Ok(())` - Name stored
    /// - `Err(AppError::Validation)` - Malformed nickname or both names empty
    /// - `Err(AppError::NotFound)` - Nobody linked the nickname
    pub async fn update_rp_name(&self, param: UpdateRpNameParam) -> Result<(), AppError> {
        let param = UpdateRpNameParam {
            nickname: param.nickname.trim().to_string(),
            first_name: param.first_name.trim().to_string(),
            last_name: param.last_name.trim().to_string(),
        };

        if !is_valid_nickname(&param.nickname) {
            return Err(AppError::Validation("invalid nickname".to_string()));
        }
        if param.first_name.is_empty() && param.last_name.is_empty() {
            return Err(AppError::Validation(
                "firstName or lastName required".to_string(),
            ));
        }

        let updated = UserRepository::new(self.db).update_rp_name(param).await?;
        if updated == 0 {
            return Err(AppError::NotFound("linked user not found".to_string()));
        }

        Ok(())
    }

    /// Deletes used and expired codes.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of codes deleted
    /// - `Err(AppError::DbErr)` - Database error during delete
    pub async fn cleanup_stale(&self) -> Result<u64, AppError> {
        let deleted = VerificationCodeRepository::new(self.db)
            .delete_stale(Utc::now())
            .await?;

        Ok(deleted)
    }
}

/// Draws a code of `CODE_LENGTH` characters from `CODE_ALPHABET`.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
