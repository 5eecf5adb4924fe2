use super::*;

/// Tests linking a nickname to an existing user.
///
/// Expected: Ok(1) and the user carries the nickname and verification time
#[tokio::test]
async fn links_nickname() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let discord_id = user.discord_id.parse::<u64>().unwrap();

    let repo = UserRepository::new(db);
    let updated = repo.link_minecraft(discord_id, "Steve_99", Utc::now()).await?;

    assert_eq!(updated, 1);
    let user = repo.find_by_discord_id(discord_id).await?.unwrap();
    assert_eq!(user.linked_minecraft.as_deref(), Some("Steve_99"));
    assert!(user.minecraft_verified_at.is_some());

    Ok(())
}

/// Tests linking for an unknown user.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let updated = repo.link_minecraft(42, "Steve_99", Utc::now()).await?;

    assert_eq!(updated, 0);

    Ok(())
}
