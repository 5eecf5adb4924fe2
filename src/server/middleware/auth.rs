use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

/// Resolves the logged-in user of a request from the session and the database.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Requires a logged-in user.
    ///
    /// # Returns
    /// - `Ok(User)` - The user stored in the session
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - Session points at a deleted user
    pub async fn require(&self) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db)
            .find_by_discord_id(user_id)
            .await?
        else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(user)
    }

    /// Resolves the logged-in user for endpoints that also serve anonymous callers.
    ///
    /// A session pointing at a missing user is treated as anonymous.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        UserRepository::new(self.db).find_by_discord_id(user_id).await
    }
}
