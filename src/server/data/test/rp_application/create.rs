use super::*;

/// Tests inserting a new application.
///
/// Expected: Ok with pending status, the given token and no Discord message
#[tokio::test]
async fn creates_pending_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RpApplicationRepository::new(db);
    let application = repo.create(create_param("token-a")).await?;

    assert_eq!(application.discord_id, OWNER);
    assert_eq!(application.status, RpApplicationStatus::Pending);
    assert_eq!(application.moderation_token, "token-a");
    assert_eq!(application.fields.nickname, "Steve_99");
    assert!(application.discord_message_id.is_none());
    assert!(application.moderated_at.is_none());

    Ok(())
}

/// Tests inserting a second pending application for the same owner.
///
/// Expected: Err(AppError::Conflict) from the one-pending-per-owner index
#[tokio::test]
async fn rejects_second_pending_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RpApplicationRepository::new(db);
    repo.create(create_param("token-a")).await?;
    let result = repo.create(create_param("token-b")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests inserting a pending application next to a canceled one.
///
/// Expected: Ok since only pending rows are unique per owner
#[tokio::test]
async fn allows_pending_after_canceled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .status("canceled")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let result = repo.create(create_param("token-a")).await;

    assert!(result.is_ok());

    Ok(())
}
