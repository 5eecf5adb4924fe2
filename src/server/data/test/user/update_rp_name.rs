use super::*;

/// Tests updating the RP name of the user linked to a nickname.
///
/// Expected: Ok(1) with both names stored
#[tokio::test]
async fn updates_linked_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .linked_minecraft("Steve_99")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_rp_name(UpdateRpNameParam {
            nickname: "Steve_99".to_string(),
            first_name: "Aldric".to_string(),
            last_name: "Stone".to_string(),
        })
        .await?;

    assert_eq!(updated, 1);
    let user = repo
        .find_by_discord_id(user.discord_id.parse().unwrap())
        .await?
        .unwrap();
    assert_eq!(user.rp_first_name.as_deref(), Some("Aldric"));
    assert_eq!(user.rp_last_name.as_deref(), Some("Stone"));

    Ok(())
}

/// Tests updating when nobody is linked to the nickname.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_without_linked_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_rp_name(UpdateRpNameParam {
            nickname: "Nobody".to_string(),
            first_name: "A".to_string(),
            last_name: String::new(),
        })
        .await?;

    assert_eq!(updated, 0);

    Ok(())
}
