//! Verification code factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating Minecraft verification codes.
///
/// Defaults to an unused code expiring 15 minutes from now.
pub struct VerificationCodeFactory<'a> {
    db: &'a DatabaseConnection,
    application: &'a entity::rp_application::Model,
    code: String,
    used: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl<'a> VerificationCodeFactory<'a> {
    /// Creates a factory for a code issued against `application`.
    ///
    /// The owner and nickname are taken from the application.
    pub fn new(db: &'a DatabaseConnection, application: &'a entity::rp_application::Model) -> Self {
        let now = Utc::now();
        Self {
            db,
            application,
            code: format!("CODE{:04}", next_id() % 10_000),
            used: false,
            expires_at: now + Duration::minutes(15),
            created_at: now,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn used(mut self, used: bool) -> Self {
        self.used = used;
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the verification code.
    pub async fn build(self) -> Result<entity::verification_code::Model, DbErr> {
        entity::verification_code::ActiveModel {
            code: ActiveValue::Set(self.code),
            discord_id: ActiveValue::Set(self.application.discord_id.clone()),
            nickname: ActiveValue::Set(self.application.nickname.clone()),
            application_id: ActiveValue::Set(self.application.id),
            used: ActiveValue::Set(self.used),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unused, unexpired code for the application.
pub async fn create_verification_code(
    db: &DatabaseConnection,
    application: &entity::rp_application::Model,
) -> Result<entity::verification_code::Model, DbErr> {
    VerificationCodeFactory::new(db, application).build().await
}
