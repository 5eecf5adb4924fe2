use std::time::Duration;

use sea_orm::DatabaseConnection;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};
use url::Url;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use crate::server::{
    data::{
        rp_application::RpApplicationRepository, verification_code::VerificationCodeRepository,
    },
    error::AppError,
    model::{
        moderation::{ModerationAccess, ModerationLinkPolicy, ModeratorAllowList},
        rp_application::{RpApplicationFields, RpApplicationStatus},
    },
    service::{
        discord_bridge::DiscordWebhookBridge, moderation_token::ModerationTokenIssuer,
        rp_application::RpApplicationService,
    },
};


const OWNER: u64 = 123456789012345678;
const MODERATOR: u64 = 987654321098765432;

/// Collaborators of the service under test.
struct Deps {
    bridge: DiscordWebhookBridge,
    token_issuer: ModerationTokenIssuer,
    access: ModerationAccess,
}

impl Deps {
    /// Bridge disabled, token-only links.
    fn new() -> Self {
        Self {
            bridge: DiscordWebhookBridge::new(
                reqwest::Client::new(),
                None,
                "https://api.example.com",
                Duration::from_secs(1),
            ),
            token_issuer: ModerationTokenIssuer::new(20),
            access: ModerationAccess::new(
                ModerationLinkPolicy::TokenOnly,
                ModeratorAllowList::default(),
            ),
        }
    }

    /// Bridge posting to `server`.
    fn with_webhook(server: &MockServer) -> Self {
        let webhook_url = Url::parse(&format!("{}/api/webhooks/1/secret", server.uri())).unwrap();

        Self {
            bridge: DiscordWebhookBridge::new(
                reqwest::Client::new(),
                Some(webhook_url),
                "https://api.example.com",
                Duration::from_secs(2),
            ),
            ..Self::new()
        }
    }

    fn moderator_only(mut self) -> Self {
        self.access = ModerationAccess::new(
            ModerationLinkPolicy::TokenAndModerator,
            ModeratorAllowList::new([MODERATOR]),
        );
        self
    }

    fn service<'a>(&'a self, db: &'a DatabaseConnection) -> RpApplicationService<'a> {
        RpApplicationService::new(db, &self.bridge, &self.token_issuer, &self.access)
    }
}

fn valid_fields() -> RpApplicationFields {
    RpApplicationFields {
        nickname: "Steve_99".to_string(),
        source: "A friend".to_string(),
        rp_name: "Aldric Stone".to_string(),
        birth_date: "1990-04-12".to_string(),
        race: "Human".to_string(),
        gender: "Male".to_string(),
        skills: "Smithing".to_string(),
        plan: "Open a forge.".to_string(),
        biography: "Born. Raised. Trained. Travelled. Settled.".to_string(),
        skin_url: "https://cdn.example.com/skin.png".to_string(),
    }
}
