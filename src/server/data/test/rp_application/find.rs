use super::*;

/// Tests that the newest application of an owner is returned.
///
/// Expected: Ok(Some) with the most recently created application
#[tokio::test]
async fn finds_latest_by_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .status("canceled")
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    let newest = factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .created_at(now)
        .build()
        .await?;
    factory::create_application(db, "42").await?;

    let repo = RpApplicationRepository::new(db);
    let latest = repo.find_latest_by_owner(OWNER).await?.unwrap();

    assert_eq!(latest.id, newest.id);

    Ok(())
}

/// Tests finding the latest application of an owner without any.
///
/// Expected: Ok(None)
#[tokio::test]
async fn finds_nothing_for_owner_without_applications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RpApplicationRepository::new(db);
    let latest = repo.find_latest_by_owner(OWNER).await?;

    assert!(latest.is_none());

    Ok(())
}

/// Tests that legacy `approved` rows are found as accepted applications.
///
/// Expected: Ok(Some) decoded as Accepted
#[tokio::test]
async fn finds_legacy_approved_by_nickname() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .nickname("Steve_99")
        .status("approved")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let found = repo
        .find_latest_accepted_by_nickname("Steve_99")
        .await?
        .unwrap();

    assert_eq!(found.status, RpApplicationStatus::Accepted);

    Ok(())
}

/// Tests that pending applications are not returned as accepted.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_pending_when_finding_accepted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .nickname("Steve_99")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let found = repo.find_latest_accepted_by_nickname("Steve_99").await?;

    assert!(found.is_none());

    Ok(())
}

/// Tests counting by status, legacy spellings included.
///
/// Expected: one accepted and one canceled application
#[tokio::test]
async fn counts_by_owner_and_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    for status in ["approved", "rejected"] {
        factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
            .status(status)
            .build()
            .await?;
    }

    let repo = RpApplicationRepository::new(db);

    assert_eq!(
        repo.count_by_owner_and_status(OWNER, RpApplicationStatus::Accepted)
            .await?,
        1
    );
    assert_eq!(
        repo.count_by_owner_and_status(OWNER, RpApplicationStatus::Canceled)
            .await?,
        1
    );
    assert_eq!(
        repo.count_by_owner_and_status(OWNER, RpApplicationStatus::Pending)
            .await?,
        0
    );

    Ok(())
}

/// Tests listing applications whose ticket still has actions.
///
/// Expected: pending and accepted rows with a message ID, canceled and unposted rows skipped
#[tokio::test]
async fn finds_open_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let pending = factory::rp_application::RpApplicationFactory::new(db, "1")
        .discord_message_id("1001")
        .build()
        .await?;
    let accepted = factory::rp_application::RpApplicationFactory::new(db, "2")
        .status("accepted")
        .discord_message_id("1002")
        .build()
        .await?;
    factory::rp_application::RpApplicationFactory::new(db, "3")
        .status("canceled")
        .discord_message_id("1003")
        .build()
        .await?;
    factory::rp_application::RpApplicationFactory::new(db, "4")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let open = repo.find_with_open_ticket().await?;

    let ids: Vec<i32> = open.iter().map(|application| application.id).collect();
    assert_eq!(ids, vec![pending.id, accepted.id]);

    Ok(())
}

/// Tests that the first submission time of an owner ignores later applications.
///
/// Expected: Ok(Some) with the creation time of the oldest application
#[tokio::test]
async fn finds_first_created_at_by_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let now = Utc::now();
    let oldest = factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .status("canceled")
        .created_at(now - Duration::days(30))
        .build()
        .await?;
    factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .created_at(now)
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let first = repo.find_first_created_at_by_owner(OWNER).await?;
    let missing = repo.find_first_created_at_by_owner(42).await?;

    assert_eq!(first, Some(oldest.created_at));
    assert!(missing.is_none());

    Ok(())
}
