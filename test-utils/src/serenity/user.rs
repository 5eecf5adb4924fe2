//! Test factory for Serenity `User` objects as returned by `GET /users/@me`.

use serde_json::{json, Value};
use serenity::all::User;

/// Builds the JSON body Discord returns for `GET /users/@me` with the `identify` and
/// `email` scopes.
///
/// Useful for mock HTTP servers standing in for Discord.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Unique username
/// - `global_name` - Optional display name
pub fn test_user_json(user_id: u64, username: &str, global_name: Option<&str>) -> Value {
    json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": global_name,
        "avatar": "a1b2c3d4e5f60718293a4b5c6d7e8f90",
        "bot": false,
        "mfa_enabled": false,
        "verified": true,
        "email": format!("{}@example.com", username),
        "public_flags": 0,
        "flags": 0,
    })
}

/// Creates a test Serenity User.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Unique username
/// - `global_name` - Optional display name
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, username: &str, global_name: Option<&str>) -> User {
    serde_json::from_value(test_user_json(user_id, username, global_name))
        .expect("Failed to create test user - invalid JSON structure")
}
