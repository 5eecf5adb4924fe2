//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user owning an application in the given status.
///
/// # Arguments
/// - `db` - Database connection
/// - `status` - Stored status of the application (`pending`, `accepted`, ...)
///
/// # Returns
/// - `Ok((user, application))` - The created rows
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_with_application(
    db: &DatabaseConnection,
    status: &str,
) -> Result<(entity::user::Model, entity::rp_application::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let application =
        crate::factory::rp_application::RpApplicationFactory::new(db, &user.discord_id)
            .status(status)
            .build()
            .await?;

    Ok((user, application))
}
