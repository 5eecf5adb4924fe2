use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::auth::DiscordAuthService;

impl<'a> DiscordAuthService<'a> {
    /// Builds the Discord authorize URL and the CSRF state expected back in the callback.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url()
    }
}
