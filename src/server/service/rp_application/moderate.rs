use chrono::Utc;
use subtle::ConstantTimeEq;

use crate::server::{
    data::rp_application::RpApplicationRepository,
    error::{internal::InternalError, AppError},
    model::rp_application::{
        ApplyTransitionParam, ModerationAction, ModerationOutcome, RpApplicationStatus,
    },
    service::rp_application::RpApplicationService,
};

impl<'a> RpApplicationService<'a> {
    /// Follows a moderation link from a Discord ticket.
    ///
    /// The link carries the action and the application's current moderation token. A
    /// transition the current status does not allow is reported as already processed
    /// without any change. Entering `pending` again issues a new token, which invalidates
    /// every link of the previous episode. The Discord ticket is edited after the status
    /// change is stored; if that edit fails the change is kept and the error returned.
    ///
    /// # Arguments
    /// - `id` - Application ID from the link path
    /// - `raw_action` - Action from the link query, either vocabulary
    /// - `token` - Moderation token from the link query
    /// - `caller` - Discord ID of the logged-in user, if any
    ///
    /// # Returns
    /// - `Ok(ModerationOutcome)` - Applied or already processed
    /// - `Err(AppError::Validation)` - Unknown action
    /// - `Err(AppError::Unauthorized)` - Empty or wrong token, or moderator login required
    /// - `Err(AppError::Forbidden)` - Caller is not a moderator
    /// - `Err(AppError::NotFound)` - Application does not exist
    /// - `Err(AppError::BridgeErr)` - Status changed but the ticket edit failed
    pub async fn act_on_link(
        &self,
        id: i32,
        raw_action: &str,
        token: &str,
        caller: Option<u64>,
    ) -> Result<ModerationOutcome, AppError> {
        let action = ModerationAction::normalize(raw_action)
            .ok_or_else(|| AppError::Validation("invalid moderation action".to_string()))?;

        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("moderation token required".to_string()));
        }

        self.access.authorize(caller)?;

        let repo = RpApplicationRepository::new(self.db);
        let Some(application) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("rp application not found".to_string()));
        };

        let token_matches: bool = application
            .moderation_token
            .as_bytes()
            .ct_eq(token.as_bytes())
            .into();
        if !token_matches {
            return Err(AppError::Unauthorized(
                "invalid moderation token".to_string(),
            ));
        }

        let Some(next_status) = application.status.apply(action) else {
            tracing::debug!(
                "Ignoring {} on RP application {} in status {}",
                action.as_str(),
                id,
                application.status.as_str()
            );
            return Ok(ModerationOutcome {
                application,
                action,
                applied: false,
            });
        };

        let now = Utc::now();
        let (moderation_token, moderated_at) = if next_status == RpApplicationStatus::Pending {
            (self.token_issuer.issue(), None)
        } else {
            (application.moderation_token.clone(), Some(now))
        };

        let updated = repo
            .apply_transition(ApplyTransitionParam {
                id,
                expected_status: application.status,
                expected_token: application.moderation_token.clone(),
                next_status,
                moderation_token,
                moderated_at,
                updated_at: now,
            })
            .await?;

        if updated == 0 {
            // Another click won the race; report the state it left behind.
            let Some(current) = repo.find_by_id(id).await? else {
                return Err(AppError::NotFound("rp application not found".to_string()));
            };
            return Ok(ModerationOutcome {
                application: current,
                action,
                applied: false,
            });
        }

        let application = repo
            .find_by_id(id)
            .await?
            .ok_or(InternalError::ApplicationVanished(id))?;

        tracing::info!(
            "RP application {} moved to {} via {} link",
            id,
            application.status.as_str(),
            action.as_str()
        );

        if let Err(err) = self.refresh_ticket(&application).await {
            tracing::warn!(
                "RP application {} is {} but its Discord ticket was not updated: {}",
                id,
                application.status.as_str(),
                err
            );
            return Err(err);
        }

        Ok(ModerationOutcome {
            application,
            action,
            applied: true,
        })
    }
}
