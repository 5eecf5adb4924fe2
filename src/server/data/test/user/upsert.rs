use super::*;

fn param(discord_id: u64, username: &str) -> UpsertUserParam {
    UpsertUserParam {
        discord_id,
        username: username.to_string(),
        global_name: Some("Steve".to_string()),
        email: Some("steve@example.com".to_string()),
        avatar: None,
    }
}

/// Tests creating a new user on first login.
///
/// Expected: Ok with the Discord profile stored and no Minecraft link
#[tokio::test]
async fn creates_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.upsert(param(123456789, "steve")).await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.username, "steve");
    assert_eq!(user.email.as_deref(), Some("steve@example.com"));
    assert!(user.linked_minecraft.is_none());

    Ok(())
}

/// Tests that a repeated login refreshes the profile but keeps the Minecraft link.
///
/// Expected: Ok with new username and the original linked nickname
#[tokio::test]
async fn updates_profile_and_preserves_link() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("123456789")
        .username("old_name")
        .linked_minecraft("Steve_99")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo.upsert(param(123456789, "new_name")).await?;

    assert_eq!(user.username, "new_name");
    assert_eq!(user.linked_minecraft.as_deref(), Some("Steve_99"));
    assert!(user.minecraft_verified_at.is_some());

    Ok(())
}
