use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, StandardTokenResponse,
    TokenResponse,
};
use serenity::all::User as DiscordUser;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    service::auth::DiscordAuthService,
};

impl<'a> DiscordAuthService<'a> {
    /// Finishes a Discord login.
    ///
    /// Exchanges the authorization code, fetches the Discord profile and upserts the user
    /// row, keeping any linked Minecraft nickname and RP name.
    ///
    /// # Returns
    /// - `Ok(User)` - Logged-in user
    /// - `Err(AppError::AuthErr(TokenExchangeFailed))` - Discord refused the code
    /// - `Err(AppError::ReqwestErr)` - Fetching the profile failed
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn callback(&self, authorization_code: String) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|err| AuthError::TokenExchangeFailed(err.to_string()))?;

        let discord_user = self.fetch_discord_user(&token).await?;
        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam::from_discord(&discord_user))
            .await?;

        tracing::info!("User {} ({}) logged in", user.username, user.discord_id);

        Ok(user)
    }

    /// Retrieves a Discord user's information using provided access token
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let access_token = token.access_token().secret();

        let user_info = self
            .http_client
            .get(self.user_url)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user_info)
    }
}
