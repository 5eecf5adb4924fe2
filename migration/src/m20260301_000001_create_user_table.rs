use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string(User::DiscordId).primary_key())
                    .col(string(User::Username))
                    .col(string_null(User::GlobalName))
                    .col(string_null(User::Email))
                    .col(string_null(User::Avatar))
                    .col(string_null(User::LinkedMinecraft))
                    .col(string_null(User::RpFirstName))
                    .col(string_null(User::RpLastName))
                    .col(timestamp_with_time_zone_null(User::MinecraftVerifiedAt))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Lookups from the game server go through the linked nickname
        manager
            .create_index(
                Index::create()
                    .name("idx_user_linked_minecraft")
                    .table(User::Table)
                    .col(User::LinkedMinecraft)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_linked_minecraft")
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    DiscordId,
    Username,
    GlobalName,
    Email,
    Avatar,
    LinkedMinecraft,
    RpFirstName,
    RpLastName,
    MinecraftVerifiedAt,
    CreatedAt,
    UpdatedAt,
}
