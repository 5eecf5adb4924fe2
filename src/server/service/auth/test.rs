use serde_json::json;
use test_utils::{builder::TestBuilder, serenity::test_user_json};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    service::auth::DiscordAuthService,
    startup::setup_oauth_client,
};

fn config(server: &MockServer) -> Config {
    let mut config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DISCORD_CLIENT_ID" => Some("client-id".to_string()),
        "DISCORD_CLIENT_SECRET" => Some("client-secret".to_string()),
        "DISCORD_REDIRECT_URL" => Some("http://localhost:8080/api/auth/callback".to_string()),
        _ => None,
    })
    .unwrap();
    config.discord_token_url = format!("{}/api/oauth2/token", server.uri());
    config.discord_user_url = format!("{}/api/users/@me", server.uri());
    config
}

/// Tests the login URL.
///
/// Expected: Discord authorize URL with identify and email scopes and the CSRF state
#[tokio::test]
async fn builds_login_url() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    let config = config(&server);
    let oauth_client = setup_oauth_client(&config)?;
    let http_client = reqwest::Client::new();

    let service =
        DiscordAuthService::new(db, &http_client, &oauth_client, &config.discord_user_url);
    let (url, csrf) = service.login_url();

    assert!(url.as_str().starts_with("https://discord.com/oauth2/authorize"));
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("scope".to_string(), "identify email".to_string())));
    assert!(pairs.contains(&("state".to_string(), csrf.secret().clone())));
    assert!(pairs.contains(&("client_id".to_string(), "client-id".to_string())));

    Ok(())
}

/// Tests a successful callback.
///
/// Expected: Ok with the Discord profile stored as a user
#[tokio::test]
async fn stores_user_from_discord_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-123",
            "token_type": "Bearer",
            "expires_in": 604800,
            "scope": "identify email"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/@me"))
        .and(header("authorization", "Bearer access-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(test_user_json(
                123456789,
                "steve",
                Some("Steve"),
            )),
        )
        .expect(1)
        .mount(&server)
        .await;
    let config = config(&server);
    let oauth_client = setup_oauth_client(&config)?;
    let http_client = reqwest::Client::new();

    let service =
        DiscordAuthService::new(db, &http_client, &oauth_client, &config.discord_user_url);
    let user = service.callback("auth-code".to_string()).await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.username, "steve");
    assert_eq!(user.display_name(), "Steve");
    let stored = UserRepository::new(db).find_by_discord_id(123456789).await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests a callback whose code Discord refuses.
///
/// Expected: Err(AuthError::TokenExchangeFailed)
#[tokio::test]
async fn fails_when_code_is_refused() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;
    let config = config(&server);
    let oauth_client = setup_oauth_client(&config)?;
    let http_client = reqwest::Client::new();

    let service =
        DiscordAuthService::new(db, &http_client, &oauth_client, &config.discord_user_url);
    let result = service.callback("bad-code".to_string()).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::TokenExchangeFailed(_)))
    ));

    Ok(())
}
