use super::*;

fn accept_param(id: i32, expected_token: &str) -> ApplyTransitionParam {
    let now = Utc::now();

    ApplyTransitionParam {
        id,
        expected_status: RpApplicationStatus::Pending,
        expected_token: expected_token.to_string(),
        next_status: RpApplicationStatus::Accepted,
        moderation_token: expected_token.to_string(),
        moderated_at: Some(now),
        updated_at: now,
    }
}

/// Tests applying a transition when status and token still match.
///
/// Expected: Ok(1) and the row is accepted with a moderation time
#[tokio::test]
async fn applies_matching_transition() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let application = factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .moderation_token("token-a")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let updated = repo
        .apply_transition(accept_param(application.id, "token-a"))
        .await?;

    assert_eq!(updated, 1);
    let stored = repo.find_by_id(application.id).await?.unwrap();
    assert_eq!(stored.status, RpApplicationStatus::Accepted);
    assert!(stored.moderated_at.is_some());

    Ok(())
}

/// Tests that a stale token does not apply.
///
/// Expected: Ok(0) and the row stays pending
#[tokio::test]
async fn skips_stale_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let application = factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .moderation_token("token-b")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let updated = repo
        .apply_transition(accept_param(application.id, "token-a"))
        .await?;

    assert_eq!(updated, 0);
    let stored = repo.find_by_id(application.id).await?.unwrap();
    assert_eq!(stored.status, RpApplicationStatus::Pending);

    Ok(())
}

/// Tests that a second identical transition does not apply twice.
///
/// Expected: first call Ok(1), second call Ok(0)
#[tokio::test]
async fn applies_only_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let application = factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .moderation_token("token-a")
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let first = repo
        .apply_transition(accept_param(application.id, "token-a"))
        .await?;
    let second = repo
        .apply_transition(accept_param(application.id, "token-a"))
        .await?;

    assert_eq!(first, 1);
    assert_eq!(second, 0);

    Ok(())
}

/// Tests reconsidering a legacy `approved` row.
///
/// Expected: Ok(1) with the row pending, the token rotated and moderation time cleared
#[tokio::test]
async fn reconsiders_legacy_approved_row() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let application = factory::rp_application::RpApplicationFactory::new(db, OWNER.to_string())
        .status("approved")
        .moderation_token("token-a")
        .moderated_at(Utc::now())
        .build()
        .await?;

    let repo = RpApplicationRepository::new(db);
    let updated = repo
        .apply_transition(ApplyTransitionParam {
            id: application.id,
            expected_status: RpApplicationStatus::Accepted,
            expected_token: "token-a".to_string(),
            next_status: RpApplicationStatus::Pending,
            moderation_token: "token-b".to_string(),
            moderated_at: None,
            updated_at: Utc::now(),
        })
        .await?;

    assert_eq!(updated, 1);
    let stored = repo.find_by_id(application.id).await?.unwrap();
    assert_eq!(stored.status, RpApplicationStatus::Pending);
    assert_eq!(stored.moderation_token, "token-b");
    assert!(stored.moderated_at.is_none());

    Ok(())
}
