//! RP application fixtures for creating in-memory test data.

use chrono::{DateTime, TimeZone, Utc};
use entity::rp_application;

/// Default owner Discord ID.
pub const DEFAULT_DISCORD_ID: &str = "123456789012345678";

/// Default Minecraft nickname.
pub const DEFAULT_NICKNAME: &str = "Steve_99";

/// Default moderation token (40 hex characters).
pub const DEFAULT_TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Creates a pending application model with default values.
///
/// # Returns
/// - `rp_application::Model` - In-memory application with id `1`
pub fn entity() -> rp_application::Model {
    entity_builder().build()
}

/// Creates a builder for customizing an in-memory application.
pub fn entity_builder() -> RpApplicationEntityBuilder {
    RpApplicationEntityBuilder::default()
}

/// Builder for customized application models.
pub struct RpApplicationEntityBuilder {
    model: rp_application::Model,
}

impl Default for RpApplicationEntityBuilder {
    fn default() -> Self {
        let now = fixed_timestamp();
        Self {
            model: rp_application::Model {
                id: 1,
                discord_id: DEFAULT_DISCORD_ID.to_string(),
                nickname: DEFAULT_NICKNAME.to_string(),
                source: "A friend told me".to_string(),
                rp_name: "Aldric Stone".to_string(),
                birth_date: "1990-04-12".to_string(),
                race: "Human".to_string(),
                gender: "Male".to_string(),
                skills: "Smithing and trading.".to_string(),
                plan: "Open a forge in the capital.".to_string(),
                biography:
                    "Born in the north. Raised by smiths. Left home young! Travelled far. Settled down?"
                        .to_string(),
                skin_url: "https://cdn.example.com/skin.png".to_string(),
                status: "pending".to_string(),
                moderation_token: DEFAULT_TOKEN.to_string(),
                discord_message_id: None,
                moderated_at: None,
                created_at: now,
                updated_at: now,
            },
        }
    }
}

impl RpApplicationEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.model.id = id;
        self
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.model.nickname = nickname.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.model.status = status.into();
        self
    }

    pub fn moderation_token(mut self, token: impl Into<String>) -> Self {
        self.model.moderation_token = token.into();
        self
    }

    pub fn discord_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.model.discord_message_id = Some(message_id.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.model.source = source.into();
        self
    }

    pub fn biography(mut self, biography: impl Into<String>) -> Self {
        self.model.biography = biography.into();
        self
    }

    pub fn build(self) -> rp_application::Model {
        self.model
    }
}
