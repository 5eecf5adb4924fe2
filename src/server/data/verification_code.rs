//! Verification code data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::verification_code::{CreateVerificationCodeParam, VerificationCode},
};

pub struct VerificationCodeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VerificationCodeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        param: CreateVerificationCodeParam,
    ) -> Result<VerificationCode, AppError> {
        let entity = entity::verification_code::ActiveModel {
            code: ActiveValue::Set(param.code),
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            nickname: ActiveValue::Set(param.nickname),
            application_id: ActiveValue::Set(param.application_id),
            used: ActiveValue::Set(false),
            expires_at: ActiveValue::Set(param.expires_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        VerificationCode::from_entity(entity)
    }

    /// Finds the newest unused, unexpired code issued to an owner for a nickname.
    pub async fn find_active_for_owner(
        &self,
        discord_id: u64,
        nickname: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, AppError> {
        entity::prelude::VerificationCode::find()
            .filter(entity::verification_code::Column::DiscordId.eq(discord_id.to_string()))
            .filter(entity::verification_code::Column::Nickname.eq(nickname))
            .filter(active_filter(now))
            .order_by_desc(entity::verification_code::Column::CreatedAt)
            .order_by_desc(entity::verification_code::Column::Id)
            .one(self.db)
            .await?
            .map(VerificationCode::from_entity)
            .transpose()
    }

    /// Finds an unused, unexpired code by its text.
    pub async fn find_active_by_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<VerificationCode>, AppError> {
        entity::prelude::VerificationCode::find()
            .filter(entity::verification_code::Column::Code.eq(code))
            .filter(active_filter(now))
            .order_by_desc(entity::verification_code::Column::CreatedAt)
            .one(self.db)
            .await?
            .map(VerificationCode::from_entity)
            .transpose()
    }

    /// Marks a code as used.
    ///
    /// # Returns
    /// - `Ok(1)` - Code consumed by this call
    /// - `Ok(0)` - Code was already used
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_used(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::VerificationCode::update_many()
            .col_expr(entity::verification_code::Column::Used, Expr::value(true))
            .filter(entity::verification_code::Column::Id.eq(id))
            .filter(entity::verification_code::Column::Used.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every code issued for an application.
    pub async fn delete_by_application(&self, application_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::VerificationCode::delete_many()
            .filter(entity::verification_code::Column::ApplicationId.eq(application_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes codes that are used or expired at `now`.
    pub async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::VerificationCode::delete_many()
            .filter(
                Condition::any()
                    .add(entity::verification_code::Column::Used.eq(true))
                    .add(entity::verification_code::Column::ExpiresAt.lte(now)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn active_filter(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(entity::verification_code::Column::Used.eq(false))
        .add(entity::verification_code::Column::ExpiresAt.gt(now))
}
