//! Discord webhook bridge keeping one ticket message per application.
//!
//! The message is created when an application is submitted, edited after every status
//! change and deleted together with the application. Each call is a single request bounded
//! by the configured timeout; failures are returned to the caller and never retried. Without
//! a configured webhook every operation succeeds without doing anything.

pub mod payload;

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::server::{
    error::bridge::BridgeError,
    model::{rp_application::RpApplication, user::User},
    service::discord_bridge::payload::RpTicketMessage,
};

/// Longest part of an error response body kept in `BridgeError::UnexpectedStatus`.
const ERROR_BODY_LIMIT: usize = 300;

#[derive(Deserialize)]
struct PostedMessage {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Clone)]
pub struct DiscordWebhookBridge {
    http_client: reqwest::Client,
    webhook_url: Option<Url>,
    app_url: String,
    timeout: Duration,
}

impl DiscordWebhookBridge {
    /// Creates a bridge.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `webhook_url` - Webhook receiving tickets, `None` disables the bridge
    /// - `app_url` - Public API base used in moderation links
    /// - `timeout` - Deadline of every webhook request
    pub fn new(
        http_client: reqwest::Client,
        webhook_url: Option<Url>,
        app_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            webhook_url,
            app_url: app_url.into(),
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Posts the ticket for a new application.
    ///
    /// # Returns
    /// - `Ok(Some(message_id))` - Ticket posted
    /// - `Ok(None)` - Bridge disabled, or Discord did not report a message ID
    /// - `Err(BridgeError)` - Timeout, transport failure or non-success status
    pub async fn publish(
        &self,
        application: &RpApplication,
        submitter: Option<&User>,
    ) -> Result<Option<String>, BridgeError> {
        let Some(webhook_url) = &self.webhook_url else {
            return Ok(None);
        };

        let mut url = webhook_url.clone();
        url.query_pairs_mut()
            .append_pair("wait", "true")
            .append_pair("with_components", "true");

        let message = RpTicketMessage::new(application, submitter, &self.app_url);
        let response = self
            .http_client
            .post(url)
            .timeout(self.timeout)
            .json(&message.execute_webhook())
            .send()
            .await?;
        let body = ensure_success(response).await?.text().await?;

        let message_id = serde_json::from_str::<PostedMessage>(&body)
            .ok()
            .and_then(|posted| posted.id)
            .filter(|id| !id.trim().is_empty());

        if message_id.is_none() {
            tracing::warn!(
                "Discord accepted ticket for application {} without returning a message ID",
                application.id
            );
        }

        Ok(message_id)
    }

    /// Replaces the ticket with the current application state.
    ///
    /// A message that no longer exists on Discord counts as success.
    pub async fn edit(
        &self,
        message_id: &str,
        application: &RpApplication,
        submitter: Option<&User>,
    ) -> Result<(), BridgeError> {
        let Some(mut url) = self.message_url(message_id)? else {
            return Ok(());
        };
        url.query_pairs_mut().append_pair("with_components", "true");

        let message = RpTicketMessage::new(application, submitter, &self.app_url);
        let response = self
            .http_client
            .patch(url)
            .timeout(self.timeout)
            .json(&message.edit_webhook_message())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!(
                "Discord message {} for application {} no longer exists, skipping edit",
                message_id,
                application.id
            );
            return Ok(());
        }

        ensure_success(response).await?;

        Ok(())
    }

    /// Deletes a ticket. A message that no longer exists counts as success.
    pub async fn delete(&self, message_id: &str) -> Result<(), BridgeError> {
        let Some(url) = self.message_url(message_id)? else {
            return Ok(());
        };

        let response = self
            .http_client
            .delete(url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Discord message {} was already deleted", message_id);
            return Ok(());
        }

        ensure_success(response).await?;

        Ok(())
    }

    /// URL of a posted message, keeping the webhook's own query such as `thread_id`.
    ///
    /// # Returns
    /// - `Ok(Some(url))` - Message URL
    /// - `Ok(None)` - Bridge disabled or empty message ID
    /// - `Err(BridgeError::InvalidWebhookUrl)` - Webhook URL cannot carry a path
    fn message_url(&self, message_id: &str) -> Result<Option<Url>, BridgeError> {
        let message_id = message_id.trim();
        let Some(webhook_url) = &self.webhook_url else {
            return Ok(None);
        };
        if message_id.is_empty() {
            return Ok(None);
        }

        let mut url = webhook_url.clone();
        url.path_segments_mut()
            .map_err(|_| BridgeError::InvalidWebhookUrl(webhook_url.to_string()))?
            .pop_if_empty()
            .push("messages")
            .push(message_id);

        Ok(Some(url))
    }
}

async fn ensure_success(response: Response) -> Result<Response, BridgeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = payload::truncate_for_discord(&body, ERROR_BODY_LIMIT);

    Err(BridgeError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod test;
