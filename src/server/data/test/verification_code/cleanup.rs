use super::*;

/// Tests deleting used and expired codes.
///
/// Expected: Ok(2) with only the active code left
#[tokio::test]
async fn deletes_used_and_expired_codes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, application) = factory::helpers::create_user_with_application(db, "accepted").await?;
    factory::verification_code::VerificationCodeFactory::new(db, &application)
        .used(true)
        .build()
        .await?;
    factory::verification_code::VerificationCodeFactory::new(db, &application)
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;
    let active = factory::verification_code::VerificationCodeFactory::new(db, &application)
        .code("ACTIVE23")
        .build()
        .await?;

    let repo = VerificationCodeRepository::new(db);
    let deleted = repo.delete_stale(Utc::now()).await?;

    assert_eq!(deleted, 2);
    let remaining = repo.find_active_by_code("ACTIVE23", Utc::now()).await?;
    assert_eq!(remaining.map(|code| code.id), Some(active.id));

    Ok(())
}

/// Tests deleting the codes of a single application.
///
/// Expected: Ok(1) and codes of other applications untouched
#[tokio::test]
async fn deletes_codes_by_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, first) = factory::helpers::create_user_with_application(db, "accepted").await?;
    let (_, second) = factory::helpers::create_user_with_application(db, "accepted").await?;
    factory::create_verification_code(db, &first).await?;
    let kept = factory::create_verification_code(db, &second).await?;

    let repo = VerificationCodeRepository::new(db);
    let deleted = repo.delete_by_application(first.id).await?;

    assert_eq!(deleted, 1);
    assert!(repo
        .find_active_by_code(&kept.code, Utc::now())
        .await?
        .is_some());

    Ok(())
}
