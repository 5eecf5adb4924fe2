//! RP application workflow: submission, moderation links, deletion and ticket resync.
//!
//! Every operation persists its change first and then mirrors it to Discord through the
//! webhook bridge. Submission is the only operation that compensates a bridge failure, by
//! deleting the row it just inserted; a failed edit after a status change leaves the new
//! status in place.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{rp_application::RpApplicationRepository, user::UserRepository},
    error::AppError,
    model::{moderation::ModerationAccess, rp_application::RpApplication, user::User},
    service::{discord_bridge::DiscordWebhookBridge, moderation_token::ModerationTokenIssuer},
};

pub mod delete;
pub mod moderate;
pub mod resync;
pub mod submit;
pub mod validation;

#[cfg(test)]
mod test;

pub struct RpApplicationService<'a> {
    db: &'a DatabaseConnection,
    bridge: &'a DiscordWebhookBridge,
    token_issuer: &'a ModerationTokenIssuer,
    access: &'a ModerationAccess,
}

impl<'a> RpApplicationService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        bridge: &'a DiscordWebhookBridge,
        token_issuer: &'a ModerationTokenIssuer,
        access: &'a ModerationAccess,
    ) -> Self {
        Self {
            db,
            bridge,
            token_issuer,
            access,
        }
    }

    /// Gets the most recently created application of an owner.
    ///
    /// # Returns
    /// - `Ok(Some(RpApplication))` - Latest application
    /// - `Ok(None)` - Owner never applied
    /// - `Err(AppError)` - Database error or undecodable row
    pub async fn latest_summary(&self, owner: u64) -> Result<Option<RpApplication>, AppError> {
        RpApplicationRepository::new(self.db)
            .find_latest_by_owner(owner)
            .await
    }

    /// Loads the owner account shown in the Discord ticket.
    async fn submitter(&self, application: &RpApplication) -> Result<Option<User>, AppError> {
        UserRepository::new(self.db)
            .find_by_discord_id(application.discord_id)
            .await
    }

    /// Re-renders the Discord ticket of an application, if it has one.
    async fn refresh_ticket(&self, application: &RpApplication) -> Result<(), AppError> {
        let Some(message_id) = application.discord_message_id.as_deref() else {
            return Ok(());
        };
        if !self.bridge.is_enabled() {
            return Ok(());
        }

        let submitter = self.submitter(application).await?;
        self.bridge
            .edit(message_id, application, submitter.as_ref())
            .await?;

        Ok(())
    }
}
