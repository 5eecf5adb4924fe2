//! Rendering of the Discord message that mirrors an application.

use serenity::all::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, EditWebhookMessage,
    ExecuteWebhook,
};
use url::form_urlencoded;

use crate::server::model::{
    rp_application::{ModerationAction, RpApplication, RpApplicationStatus},
    user::User,
};

/// Shown instead of an empty field value, which Discord rejects.
pub const EMPTY_VALUE: &str = "—";

/// Character limit applied to the long free-text fields.
pub const LONG_FIELD_LIMIT: usize = 900;

const PENDING_COLOUR: u32 = 0xE35E38;
const ACCEPTED_COLOUR: u32 = 0x3BA55D;
const CANCELED_COLOUR: u32 = 0x747F8D;

/// Ticket message for one application snapshot.
pub struct RpTicketMessage<'a> {
    application: &'a RpApplication,
    submitter: Option<&'a User>,
    app_url: &'a str,
}

impl<'a> RpTicketMessage<'a> {
    /// # Arguments
    /// - `application` - Snapshot to render
    /// - `submitter` - Owner account, when known, for the Discord account field
    /// - `app_url` - Public API base used in action links
    pub fn new(
        application: &'a RpApplication,
        submitter: Option<&'a User>,
        app_url: &'a str,
    ) -> Self {
        Self {
            application,
            submitter,
            app_url,
        }
    }

    pub fn content(&self) -> String {
        format!(
            "RP ticket for {}",
            display_value(&self.application.fields.nickname)
        )
    }

    /// Builds the embed describing the application.
    pub fn embed(&self) -> CreateEmbed {
        let application = self.application;
        let fields = &application.fields;

        CreateEmbed::new()
            .title(format!(
                "RP application: {}",
                display_value(&fields.nickname)
            ))
            .description(format!("Status: {}", application.status.label()))
            .colour(status_colour(application.status))
            .field("Discord account", self.discord_account(), false)
            .field("Nickname", display_value(&fields.nickname), true)
            .field("Source", display_value(&fields.source), true)
            .field("Character name", display_value(&fields.rp_name), true)
            .field("Birth date", display_value(&fields.birth_date), true)
            .field("Race", display_value(&fields.race), true)
            .field("Gender", display_value(&fields.gender), true)
            .field("Skills", long_value(&fields.skills), false)
            .field("Plan", long_value(&fields.plan), false)
            .field("Biography", long_value(&fields.biography), false)
            .field("Skin URL", display_value(&fields.skin_url), false)
            .footer(CreateEmbedFooter::new(format!(
                "Application #{}",
                application.id
            )))
    }

    /// Link buttons offered in the current status.
    pub fn buttons(&self) -> Vec<CreateButton> {
        let actions: &[(ModerationAction, &str)] = match self.application.status {
            RpApplicationStatus::Pending => &[
                (ModerationAction::Accept, "Accept"),
                (ModerationAction::Cancel, "Cancel"),
            ],
            RpApplicationStatus::Accepted => &[(ModerationAction::Reconsider, "Reconsider")],
            RpApplicationStatus::Canceled => &[],
        };

        actions
            .iter()
            .map(|(action, label)| {
                CreateButton::new_link(self.moderation_link(*action)).label(*label)
            })
            .collect()
    }

    pub fn components(&self) -> Vec<CreateActionRow> {
        let buttons = self.buttons();
        if buttons.is_empty() {
            return Vec::new();
        }

        vec![CreateActionRow::Buttons(buttons)]
    }

    /// Body of the webhook execution creating the ticket.
    pub fn execute_webhook(&self) -> ExecuteWebhook {
        ExecuteWebhook::new()
            .content(self.content())
            .embed(self.embed())
            .components(self.components())
    }

    /// Body of the edit replacing the ticket.
    ///
    /// Components are always sent so that buttons are removed once none apply.
    pub fn edit_webhook_message(&self) -> EditWebhookMessage {
        EditWebhookMessage::new()
            .content(self.content())
            .embeds(vec![self.embed()])
            .components(self.components())
    }

    /// Absolute link performing `action` with the application's current token.
    pub fn moderation_link(&self, action: ModerationAction) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("action", action.as_str())
            .append_pair("token", &self.application.moderation_token)
            .finish();

        format!(
            "{}/api/rp/applications/{}/moderate?{}",
            self.app_url.trim_end_matches('/'),
            self.application.id,
            query
        )
    }

    fn discord_account(&self) -> String {
        match self.submitter {
            Some(user) if !user.username.trim().is_empty() => {
                format!("{} ({})", user.username, self.application.discord_id)
            }
            _ => self.application.discord_id.to_string(),
        }
    }
}

fn status_colour(status: RpApplicationStatus) -> u32 {
    match status {
        RpApplicationStatus::Pending => PENDING_COLOUR,
        RpApplicationStatus::Accepted => ACCEPTED_COLOUR,
        RpApplicationStatus::Canceled => CANCELED_COLOUR,
    }
}

/// Returns the trimmed value, or the placeholder when it is empty.
pub fn display_value(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        EMPTY_VALUE.to_string()
    } else {
        value.to_string()
    }
}

fn long_value(value: &str) -> String {
    truncate_for_discord(&display_value(value), LONG_FIELD_LIMIT)
}

/// Cuts `value` to `max_chars` characters followed by `...` when it is longer.
pub fn truncate_for_discord(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
