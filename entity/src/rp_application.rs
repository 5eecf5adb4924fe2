use sea_orm::entity::prelude::*;

/// A single RP character application.
///
/// `status` is stored as plain text (`pending`, `accepted`, `canceled`, plus the legacy
/// `approved` / `rejected` spellings) and decoded by the server model layer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rp_application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub discord_id: String,
    pub nickname: String,
    pub source: String,
    pub rp_name: String,
    pub birth_date: String,
    pub race: String,
    pub gender: String,
    #[sea_orm(column_type = "Text")]
    pub skills: String,
    #[sea_orm(column_type = "Text")]
    pub plan: String,
    #[sea_orm(column_type = "Text")]
    pub biography: String,
    pub skin_url: String,
    pub status: String,
    pub moderation_token: String,
    pub discord_message_id: Option<String>,
    pub moderated_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::verification_code::Entity")]
    VerificationCode,
}

impl Related<super::verification_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
