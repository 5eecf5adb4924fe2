use sea_orm_migration::prelude::*;

/// Partial unique index allowing at most one pending application per owner.
///
/// Closes the window between the "no pending application" check and the insert during
/// submission. Kept as raw SQL since the statement needs a `WHERE` clause.
pub const CREATE_PENDING_APPLICATION_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     idx_rp_application_one_pending_per_owner ON rp_application (discord_id) \
     WHERE status = 'pending'";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_PENDING_APPLICATION_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_rp_application_one_pending_per_owner")
            .await?;

        Ok(())
    }
}
