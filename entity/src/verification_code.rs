use sea_orm::entity::prelude::*;

/// One-time code linking a Minecraft nickname to a Discord account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_code")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub discord_id: String,
    pub nickname: String,
    pub application_id: i32,
    pub used: bool,
    pub expires_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rp_application::Entity",
        from = "Column::ApplicationId",
        to = "super::rp_application::Column::Id",
        on_delete = "Cascade"
    )]
    RpApplication,
}

impl Related<super::rp_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RpApplication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
