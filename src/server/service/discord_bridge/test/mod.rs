use std::time::Duration;

use serde_json::json;
use test_utils::fixture;
use url::Url;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::server::{
    error::bridge::BridgeError, model::rp_application::RpApplication,
    service::discord_bridge::DiscordWebhookBridge,
};


const WEBHOOK_PATH: &str = "/api/webhooks/1/secret";
const APP_URL: &str = "https://api.example.com";

fn bridge(server: &MockServer, timeout: Duration) -> DiscordWebhookBridge {
    let webhook_url = Url::parse(&format!("{}{}", server.uri(), WEBHOOK_PATH)).unwrap();

    DiscordWebhookBridge::new(reqwest::Client::new(), Some(webhook_url), APP_URL, timeout)
}

fn disabled_bridge() -> DiscordWebhookBridge {
    DiscordWebhookBridge::new(reqwest::Client::new(), None, APP_URL, Duration::from_secs(1))
}

fn application(status: &str) -> RpApplication {
    RpApplication::from_entity(
        fixture::rp_application::entity_builder()
            .id(7)
            .status(status)
            .discord_message_id("555")
            .build(),
    )
    .unwrap()
}
