use super::*;

/// Tests anonymous callers resolve to no user instead of an error.
///
/// Expected: Ok(None)
#[tokio::test]
async fn anonymous_session_resolves_to_none() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = AuthGuard::new(db, session).current_user().await?;

    assert!(user.is_none());

    Ok(())
}

/// Tests a logged-in caller is resolved.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn resolves_logged_in_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("42")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(42).await?;

    let user = AuthGuard::new(db, session).current_user().await?;

    assert_eq!(user.map(|user| user.discord_id), Some(42));

    Ok(())
}

/// Tests logging out forgets the user.
///
/// Expected: Ok(None) after the session is cleared
#[tokio::test]
async fn cleared_session_resolves_to_none() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("42")
        .build()
        .await?;
    let auth_session = AuthSession::new(session);
    auth_session.set_user_id(42).await?;
    auth_session.clear().await?;

    let user = AuthGuard::new(db, session).current_user().await?;

    assert!(user.is_none());

    Ok(())
}
