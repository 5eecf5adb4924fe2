use super::*;

/// Tests a logged-in user is resolved from the session.
///
/// Verifies the guard reads the Discord ID stored by login and loads the
/// matching user row.
///
/// Expected: Ok(User) with the stored Discord ID
#[tokio::test]
async fn returns_logged_in_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .discord_id("123456789")
        .username("steve")
        .build()
        .await?;

    AuthSession::new(session).set_user_id(123456789).await?;

    let result = AuthGuard::new(db, session).require().await;

    assert!(result.is_ok());
    let returned = result.unwrap();
    assert_eq!(returned.discord_id, 123456789);
    assert_eq!(returned.username, user.username);

    Ok(())
}

/// Tests an anonymous session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_anonymous_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require().await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a deleted user is rejected.
///
/// Verifies the guard does not trust the session alone when the user row
/// no longer exists.
///
/// Expected: Err(AuthError::UserNotInDatabase) carrying the session ID
#[tokio::test]
async fn rejects_user_missing_from_database() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(555).await?;

    let result = AuthGuard::new(db, session).require().await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(id))) => assert_eq!(id, 555),
        other => panic!("Expected UserNotInDatabase, got: {:?}", other),
    }

    Ok(())
}
