//! OAuth2 login with Discord

use sea_orm::DatabaseConnection;

use crate::server::state::OAuth2Client;

pub mod callback;
pub mod login;

#[cfg(test)]
mod test;

pub struct DiscordAuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
    /// Discord endpoint returning the logged-in user.
    pub user_url: &'a str,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        user_url: &'a str,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            user_url,
        }
    }
}
