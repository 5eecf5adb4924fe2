use super::*;

/// Tests creating a code and finding it by its text.
///
/// Expected: Ok(Some) with the same code, unused
#[tokio::test]
async fn finds_created_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, application) =
        factory::helpers::create_user_with_application(db, "accepted").await?;

    let repo = VerificationCodeRepository::new(db);
    let created = repo
        .create(CreateVerificationCodeParam {
            code: "ABCD2345".to_string(),
            discord_id: user.discord_id.parse().unwrap(),
            nickname: application.nickname.clone(),
            application_id: application.id,
            expires_at: Utc::now() + Duration::minutes(15),
        })
        .await?;

    let found = repo
        .find_active_by_code("ABCD2345", Utc::now())
        .await?
        .unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.application_id, application.id);
    assert!(!found.used);

    Ok(())
}

/// Tests that expired and used codes are not active.
///
/// Expected: Ok(None) for both codes
#[tokio::test]
async fn ignores_expired_and_used_codes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, application) = factory::helpers::create_user_with_application(db, "accepted").await?;
    factory::verification_code::VerificationCodeFactory::new(db, &application)
        .code("EXPIRED2")
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;
    factory::verification_code::VerificationCodeFactory::new(db, &application)
        .code("USEDCODE")
        .used(true)
        .build()
        .await?;

    let repo = VerificationCodeRepository::new(db);

    assert!(repo
        .find_active_by_code("EXPIRED2", Utc::now())
        .await?
        .is_none());
    assert!(repo
        .find_active_by_code("USEDCODE", Utc::now())
        .await?
        .is_none());

    Ok(())
}

/// Tests finding the active code of an owner for a nickname.
///
/// Expected: Ok(Some) with the newest active code
#[tokio::test]
async fn finds_newest_active_code_for_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (user, application) =
        factory::helpers::create_user_with_application(db, "accepted").await?;
    let now = Utc::now();
    factory::verification_code::VerificationCodeFactory::new(db, &application)
        .code("OLDCODE2")
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;
    let newest = factory::verification_code::VerificationCodeFactory::new(db, &application)
        .code("NEWCODE2")
        .created_at(now)
        .build()
        .await?;

    let repo = VerificationCodeRepository::new(db);
    let found = repo
        .find_active_for_owner(
            user.discord_id.parse().unwrap(),
            &application.nickname,
            Utc::now(),
        )
        .await?
        .unwrap();

    assert_eq!(found.id, newest.id);

    Ok(())
}

/// Tests consuming a code twice.
///
/// Expected: first call Ok(1), second call Ok(0)
#[tokio::test]
async fn marks_code_used_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rp_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, application) = factory::helpers::create_user_with_application(db, "accepted").await?;
    let code = factory::create_verification_code(db, &application).await?;

    let repo = VerificationCodeRepository::new(db);

    assert_eq!(repo.mark_used(code.id).await?, 1);
    assert_eq!(repo.mark_used(code.id).await?, 0);

    Ok(())
}
