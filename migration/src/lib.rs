pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_rp_application_table;
mod m20260301_000003_create_verification_code_table;
mod m20260302_000004_create_pending_application_index;

pub use m20260302_000004_create_pending_application_index::CREATE_PENDING_APPLICATION_INDEX;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_rp_application_table::Migration),
            Box::new(m20260301_000003_create_verification_code_table::Migration),
            Box::new(m20260302_000004_create_pending_application_index::Migration),
        ]
    }
}
