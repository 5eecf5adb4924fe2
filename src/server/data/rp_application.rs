//! RP application data repository.
//!
//! Status filters always match every stored spelling of a status, so rows written with
//! the legacy `approved` / `rejected` values keep behaving like `accepted` / `canceled`.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::server::{
    error::AppError,
    model::rp_application::{
        ApplyTransitionParam, CreateRpApplicationParam, RpApplication, RpApplicationStatus,
    },
};

pub struct RpApplicationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RpApplicationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new pending application.
    ///
    /// The schema allows a single pending application per owner; losing that race
    /// surfaces as a conflict rather than a database error.
    ///
    /// # Arguments
    /// - `param` - Owner, trimmed fields and the initial moderation token
    ///
    /// # Returns
    /// - `Ok(RpApplication)` - The inserted application
    /// - `Err(AppError::Conflict)` - Owner already has a pending application
    /// - `Err(AppError::DbErr)` - Any other database error
    pub async fn create(&self, param: CreateRpApplicationParam) -> Result<RpApplication, AppError> {
        let now = Utc::now();
        let fields = param.fields;

        let entity = entity::rp_application::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            nickname: ActiveValue::Set(fields.nickname),
            source: ActiveValue::Set(fields.source),
            rp_name: ActiveValue::Set(fields.rp_name),
            birth_date: ActiveValue::Set(fields.birth_date),
            race: ActiveValue::Set(fields.race),
            gender: ActiveValue::Set(fields.gender),
            skills: ActiveValue::Set(fields.skills),
            plan: ActiveValue::Set(fields.plan),
            biography: ActiveValue::Set(fields.biography),
            skin_url: ActiveValue::Set(fields.skin_url),
            status: ActiveValue::Set(RpApplicationStatus::Pending.as_str().to_string()),
            moderation_token: ActiveValue::Set(param.moderation_token),
            discord_message_id: ActiveValue::Set(None),
            moderated_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Conflict("pending rp application already exists".to_string())
            }
            _ => AppError::DbErr(err),
        })?;

        RpApplication::from_entity(entity)
    }

    /// Finds an application by ID.
    ///
    /// # Returns
    /// - `Ok(Some(RpApplication))` - Application exists
    /// - `Ok(None)` - No application with that ID
    /// - `Err(AppError)` - Database error or undecodable row
    pub async fn find_by_id(&self, id: i32) -> Result<Option<RpApplication>, AppError> {
        entity::prelude::RpApplication::find_by_id(id)
            .one(self.db)
            .await?
            .map(RpApplication::from_entity)
            .transpose()
    }

    /// Finds the most recently created application of an owner.
    pub async fn find_latest_by_owner(
        &self,
        discord_id: u64,
    ) -> Result<Option<RpApplication>, AppError> {
        entity::prelude::RpApplication::find()
            .filter(entity::rp_application::Column::DiscordId.eq(discord_id.to_string()))
            .order_by_desc(entity::rp_application::Column::CreatedAt)
            .order_by_desc(entity::rp_application::Column::Id)
            .one(self.db)
            .await?
            .map(RpApplication::from_entity)
            .transpose()
    }

    /// Finds when an owner first submitted an application, whatever became of it.
    pub async fn find_first_created_at_by_owner(
        &self,
        discord_id: u64,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        let first = entity::prelude::RpApplication::find()
            .filter(entity::rp_application::Column::DiscordId.eq(discord_id.to_string()))
            .order_by_asc(entity::rp_application::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(first.map(|application| application.created_at))
    }

    /// Finds the most recently updated accepted application with the given nickname.
    pub async fn find_latest_accepted_by_nickname(
        &self,
        nickname: &str,
    ) -> Result<Option<RpApplication>, AppError> {
        entity::prelude::RpApplication::find()
            .filter(entity::rp_application::Column::Nickname.eq(nickname))
            .filter(status_filter(RpApplicationStatus::Accepted))
            .order_by_desc(entity::rp_application::Column::UpdatedAt)
            .one(self.db)
            .await?
            .map(RpApplication::from_entity)
            .transpose()
    }

    /// Counts the applications of an owner in the given status.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of matching applications
    /// - `Err(DbErr)` - Database error during count
    pub async fn count_by_owner_and_status(
        &self,
        discord_id: u64,
        status: RpApplicationStatus,
    ) -> Result<u64, DbErr> {
        entity::prelude::RpApplication::find()
            .filter(entity::rp_application::Column::DiscordId.eq(discord_id.to_string()))
            .filter(status_filter(status))
            .count(self.db)
            .await
    }

    /// Lists applications whose Discord ticket still offers actions.
    ///
    /// Returns every pending or accepted application with a recorded message ID.
    pub async fn find_with_open_ticket(&self) -> Result<Vec<RpApplication>, AppError> {
        entity::prelude::RpApplication::find()
            .filter(entity::rp_application::Column::DiscordMessageId.is_not_null())
            .filter(
                Condition::any()
                    .add(status_filter(RpApplicationStatus::Pending))
                    .add(status_filter(RpApplicationStatus::Accepted)),
            )
            .order_by_asc(entity::rp_application::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(RpApplication::from_entity)
            .collect()
    }

    /// Records the Discord message mirroring an application.
    pub async fn set_discord_message_id(&self, id: i32, message_id: &str) -> Result<(), DbErr> {
        entity::prelude::RpApplication::update_many()
            .col_expr(
                entity::rp_application::Column::DiscordMessageId,
                Expr::value(message_id.to_string()),
            )
            .filter(entity::rp_application::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Applies a status transition if the row still matches the expected state.
    ///
    /// # Returns
    /// - `Ok(1)` - Transition applied
    /// - `Ok(0)` - Row changed concurrently (status or token no longer match) or is gone
    /// - `Err(DbErr)` - Database error during update
    pub async fn apply_transition(&self, param: ApplyTransitionParam) -> Result<u64, DbErr> {
        let result = entity::prelude::RpApplication::update_many()
            .col_expr(
                entity::rp_application::Column::Status,
                Expr::value(param.next_status.as_str()),
            )
            .col_expr(
                entity::rp_application::Column::ModerationToken,
                Expr::value(param.moderation_token),
            )
            .col_expr(
                entity::rp_application::Column::ModeratedAt,
                Expr::value(param.moderated_at),
            )
            .col_expr(
                entity::rp_application::Column::UpdatedAt,
                Expr::value(param.updated_at),
            )
            .filter(entity::rp_application::Column::Id.eq(param.id))
            .filter(entity::rp_application::Column::ModerationToken.eq(param.expected_token))
            .filter(status_filter(param.expected_status))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes an application by ID.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::RpApplication::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

/// Matches every stored spelling of `status`.
fn status_filter(status: RpApplicationStatus) -> Condition {
    Condition::all().add(
        entity::rp_application::Column::Status.is_in(status.stored_spellings().iter().copied()),
    )
}
