//! RP application factory for creating test application entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test RP applications.
///
/// Defaults describe a complete, valid pending application with a 40 character hex
/// moderation token and no Discord message.
///
/// # Example
///
/// ```rust,ignore
/// let application = RpApplicationFactory::new(&db, &user.discord_id)
///     .status("accepted")
///     .discord_message_id("1300000000000000001")
///     .build()
///     .await?;
/// ```
pub struct RpApplicationFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    nickname: String,
    rp_name: String,
    status: String,
    moderation_token: String,
    discord_message_id: Option<String>,
    moderated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> RpApplicationFactory<'a> {
    /// Creates a factory for an application owned by `discord_id`.
    ///
    /// Defaults:
    /// - nickname: `"Player{id}"`
    /// - rp_name: `"Aldric Stone"`
    /// - status: `"pending"`
    /// - moderation_token: `id` as 40 hex characters
    /// - discord_message_id: `None`
    pub fn new(db: &'a DatabaseConnection, discord_id: impl Into<String>) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            discord_id: discord_id.into(),
            nickname: format!("Player{}", id),
            rp_name: "Aldric Stone".to_string(),
            status: "pending".to_string(),
            moderation_token: format!("{:040x}", id),
            discord_message_id: None,
            moderated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    pub fn rp_name(mut self, rp_name: impl Into<String>) -> Self {
        self.rp_name = rp_name.into();
        self
    }

    /// Sets the stored status string, including legacy spellings.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn moderation_token(mut self, token: impl Into<String>) -> Self {
        self.moderation_token = token.into();
        self
    }

    pub fn discord_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.discord_message_id = Some(message_id.into());
        self
    }

    pub fn moderated_at(mut self, moderated_at: DateTime<Utc>) -> Self {
        self.moderated_at = Some(moderated_at);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Builds and inserts the application into the database.
    ///
    /// # Returns
    /// - `Ok(entity::rp_application::Model)` - Created application
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::rp_application::Model, DbErr> {
        entity::rp_application::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            nickname: ActiveValue::Set(self.nickname),
            source: ActiveValue::Set("A friend told me".to_string()),
            rp_name: ActiveValue::Set(self.rp_name),
            birth_date: ActiveValue::Set("1990-04-12".to_string()),
            race: ActiveValue::Set("Human".to_string()),
            gender: ActiveValue::Set("Male".to_string()),
            skills: ActiveValue::Set("Smithing and trading.".to_string()),
            plan: ActiveValue::Set("Open a forge in the capital.".to_string()),
            biography: ActiveValue::Set(
                "Born in the north. Raised by smiths. Left home young! Travelled far. Settled down?"
                    .to_string(),
            ),
            skin_url: ActiveValue::Set("https://cdn.example.com/skin.png".to_string()),
            status: ActiveValue::Set(self.status),
            moderation_token: ActiveValue::Set(self.moderation_token),
            discord_message_id: ActiveValue::Set(self.discord_message_id),
            moderated_at: ActiveValue::Set(self.moderated_at),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.updated_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending application with default values for the given owner.
pub async fn create_application(
    db: &DatabaseConnection,
    discord_id: impl Into<String>,
) -> Result<entity::rp_application::Model, DbErr> {
    RpApplicationFactory::new(db, discord_id).build().await
}
