use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RpApplication::Table)
                    .if_not_exists()
                    .col(pk_auto(RpApplication::Id))
                    .col(string(RpApplication::DiscordId))
                    .col(string(RpApplication::Nickname))
                    .col(string(RpApplication::Source))
                    .col(string(RpApplication::RpName))
                    .col(string(RpApplication::BirthDate))
                    .col(string(RpApplication::Race))
                    .col(string(RpApplication::Gender))
                    .col(text(RpApplication::Skills))
                    .col(text(RpApplication::Plan))
                    .col(text(RpApplication::Biography))
                    .col(string(RpApplication::SkinUrl))
                    .col(string(RpApplication::Status))
                    .col(string(RpApplication::ModerationToken))
                    .col(string_null(RpApplication::DiscordMessageId))
                    .col(timestamp_with_time_zone_null(RpApplication::ModeratedAt))
                    .col(timestamp_with_time_zone(RpApplication::CreatedAt))
                    .col(timestamp_with_time_zone(RpApplication::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Latest application per owner
        manager
            .create_index(
                Index::create()
                    .name("idx_rp_application_discord_id_created_at")
                    .table(RpApplication::Table)
                    .col(RpApplication::DiscordId)
                    .col(RpApplication::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Accepted-application lookups by nickname from the game server
        manager
            .create_index(
                Index::create()
                    .name("idx_rp_application_status_updated_at")
                    .table(RpApplication::Table)
                    .col(RpApplication::Status)
                    .col(RpApplication::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_rp_application_status_updated_at")
                    .table(RpApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_rp_application_discord_id_created_at")
                    .table(RpApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RpApplication::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RpApplication {
    Table,
    Id,
    DiscordId,
    Nickname,
    Source,
    RpName,
    BirthDate,
    Race,
    Gender,
    Skills,
    Plan,
    Biography,
    SkinUrl,
    Status,
    ModerationToken,
    DiscordMessageId,
    ModeratedAt,
    CreatedAt,
    UpdatedAt,
}
