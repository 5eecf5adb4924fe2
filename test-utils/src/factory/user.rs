//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let user = UserFactory::new(&db)
///     .discord_id("123456789")
///     .username("steve")
///     .linked_minecraft("Steve_99")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    username: String,
    global_name: Option<String>,
    linked_minecraft: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - discord_id: auto-incremented numeric string
    /// - username: `"user{id}"`
    /// - global_name: `None`
    /// - linked_minecraft: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: (100_000_000_000_000_000 + id).to_string(),
            username: format!("user{}", id),
            global_name: None,
            linked_minecraft: None,
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    /// Marks the user as already linked to a Minecraft nickname.
    pub fn linked_minecraft(mut self, nickname: impl Into<String>) -> Self {
        self.linked_minecraft = Some(nickname.into());
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        let verified_at = self.linked_minecraft.as_ref().map(|_| now);

        entity::user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            username: ActiveValue::Set(self.username),
            global_name: ActiveValue::Set(self.global_name),
            email: ActiveValue::Set(None),
            avatar: ActiveValue::Set(None),
            linked_minecraft: ActiveValue::Set(self.linked_minecraft),
            rp_first_name: ActiveValue::Set(None),
            rp_last_name: ActiveValue::Set(None),
            minecraft_verified_at: ActiveValue::Set(verified_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_user_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert!(user.discord_id.parse::<u64>().is_ok());
        assert!(!user.username.is_empty());
        assert!(user.linked_minecraft.is_none());
        assert!(user.minecraft_verified_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_linked_user() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = UserFactory::new(db)
            .discord_id("123456789")
            .linked_minecraft("Steve_99")
            .build()
            .await?;

        assert_eq!(user.discord_id, "123456789");
        assert_eq!(user.linked_minecraft.as_deref(), Some("Steve_99"));
        assert!(user.minecraft_verified_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_user(db).await?;
        let second = create_user(db).await?;

        assert_ne!(first.discord_id, second.discord_id);

        Ok(())
    }
}
