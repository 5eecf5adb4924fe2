//! Type-safe session wrappers.
//!
//! Each wrapper borrows the same `Session` and exposes only the keys of its concern:
//! - `AuthSession` - Discord ID of the logged-in user
//! - `CsrfSession` - OAuth state token between login and callback

use tower_sessions::Session;

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication state of a session.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the Discord ID of the user who just logged in.
    ///
    /// The session ID is cycled first so a pre-login session cannot be fixated.
    ///
    /// # Returns
    /// - `Ok(())` - User ID stored
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn set_user_id(&self, user_id: u64) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the Discord ID of the logged-in user.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - Anonymous session
    /// - `Err(AppError)` - Session store failure or a corrupt stored ID
    pub async fn get_user_id(&self) -> Result<Option<u64>, AppError> {
        let Some(user_id_str) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        let user_id = parse_u64_from_string(user_id_str)?;

        Ok(Some(user_id))
    }

    /// Removes all data from the session and deletes it from the store.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// CSRF state of the Discord login flow.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the state token sent to Discord with the authorize URL.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the stored state token so it can only be checked once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Token found and removed
    /// - `Ok(None)` - No login in progress
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
