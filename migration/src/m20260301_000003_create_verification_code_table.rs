use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000002_create_rp_application_table::RpApplication;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationCode::Table)
                    .if_not_exists()
                    .col(pk_auto(VerificationCode::Id))
                    .col(string(VerificationCode::Code))
                    .col(string(VerificationCode::DiscordId))
                    .col(string(VerificationCode::Nickname))
                    .col(integer(VerificationCode::ApplicationId))
                    .col(boolean(VerificationCode::Used).default(false))
                    .col(timestamp_with_time_zone(VerificationCode::ExpiresAt))
                    .col(timestamp_with_time_zone(VerificationCode::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verification_code_application_id")
                            .from(VerificationCode::Table, VerificationCode::ApplicationId)
                            .to(RpApplication::Table, RpApplication::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_verification_code_code")
                    .table(VerificationCode::Table)
                    .col(VerificationCode::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_verification_code_discord_id_created_at")
                    .table(VerificationCode::Table)
                    .col(VerificationCode::DiscordId)
                    .col(VerificationCode::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_verification_code_discord_id_created_at")
                    .table(VerificationCode::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_verification_code_code")
                    .table(VerificationCode::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VerificationCode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VerificationCode {
    Table,
    Id,
    Code,
    DiscordId,
    Nickname,
    ApplicationId,
    Used,
    ExpiresAt,
    CreatedAt,
}
