//! User data repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::{
    error::AppError,
    model::user::{UpdateRpNameParam, UpsertUserParam, User},
};

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user or refreshes the Discord profile of an existing one.
    ///
    /// Only the Discord identity columns are overwritten on conflict, so the Minecraft
    /// link and RP name survive repeated logins.
    ///
    /// # Arguments
    /// - `param` - Discord profile of the user
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError::DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let now = Utc::now();

        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            username: ActiveValue::Set(param.username),
            global_name: ActiveValue::Set(param.global_name),
            email: ActiveValue::Set(param.email),
            avatar: ActiveValue::Set(param.avatar),
            linked_minecraft: ActiveValue::Set(None),
            rp_first_name: ActiveValue::Set(None),
            rp_last_name: ActiveValue::Set(None),
            minecraft_verified_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_columns([
                    entity::user::Column::Username,
                    entity::user::Column::GlobalName,
                    entity::user::Column::Email,
                    entity::user::Column::Avatar,
                    entity::user::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by Discord ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User exists
    /// - `Ok(None)` - No user with that ID
    /// - `Err(AppError)` - Database or conversion error
    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<User>, AppError> {
        entity::prelude::User::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Links a Minecraft nickname to the user and stamps the verification time.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated (0 when the user does not exist)
    /// - `Err(DbErr)` - Database error during update
    pub async fn link_minecraft(
        &self,
        discord_id: u64,
        nickname: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::LinkedMinecraft,
                Expr::value(nickname.to_string()),
            )
            .col_expr(entity::user::Column::MinecraftVerifiedAt, Expr::value(now))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user::Column::DiscordId.eq(discord_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets the RP first and last name of the user linked to a nickname.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated (0 when no user is linked to the nickname)
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_rp_name(&self, param: UpdateRpNameParam) -> Result<u64, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::RpFirstName,
                Expr::value(param.first_name),
            )
            .col_expr(entity::user::Column::RpLastName, Expr::value(param.last_name))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user::Column::LinkedMinecraft.eq(param.nickname))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
