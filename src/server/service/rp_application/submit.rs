use crate::server::{
    data::{rp_application::RpApplicationRepository, user::UserRepository},
    error::AppError,
    model::{
        rp_application::{
            CreateRpApplicationParam, RpApplication, RpApplicationFields, RpApplicationStatus,
        },
        user::User,
    },
    service::rp_application::{validation::validate_fields, RpApplicationService},
};

impl<'a> RpApplicationService<'a> {
    /// Submits a new application for moderation.
    ///
    /// Validates the fields, checks that the owner has neither an accepted nor a pending
    /// application, stores a pending application with a fresh moderation token and posts
    /// the Discord ticket. When posting fails the stored application is deleted again.
    ///
    /// # Arguments
    /// - `owner` - Discord ID of the submitting user
    /// - `fields` - Trimmed application fields
    ///
    /// # Returns
    /// - `Ok(RpApplication)` - Stored application, with its message ID when posted
    /// - `Err(AppError::Validation)` - Fields are invalid
    /// - `Err(AppError::Conflict)` - Owner already has an accepted or pending application
    /// - `Err(AppError::BridgeErr)` - Posting the ticket failed, nothing was stored
    /// - `Err(AppError::DbErr)` - Database error; after the insert the application is removed
    pub async fn submit(
        &self,
        owner: u64,
        fields: RpApplicationFields,
    ) -> Result<RpApplication, AppError> {
        validate_fields(&fields)?;

        let repo = RpApplicationRepository::new(self.db);

        if repo
            .count_by_owner_and_status(owner, RpApplicationStatus::Accepted)
            .await?
            > 0
        {
            return Err(AppError::Conflict(
                "application is already accepted".to_string(),
            ));
        }
        if repo
            .count_by_owner_and_status(owner, RpApplicationStatus::Pending)
            .await?
            > 0
        {
            return Err(AppError::Conflict(
                "pending rp application already exists".to_string(),
            ));
        }

        let submitter = if self.bridge.is_enabled() {
            UserRepository::new(self.db).find_by_discord_id(owner).await?
        } else {
            None
        };

        let mut application = repo
            .create(CreateRpApplicationParam {
                discord_id: owner,
                fields,
                moderation_token: self.token_issuer.issue(),
            })
            .await?;

        tracing::info!(
            "RP application {} submitted by {} for nickname {}",
            application.id,
            owner,
            application.fields.nickname
        );

        if !self.bridge.is_enabled() {
            return Ok(application);
        }

        match self
            .post_ticket(&repo, &application, submitter.as_ref())
            .await
        {
            Ok(message_id) => application.discord_message_id = message_id,
            Err(err) => {
                tracing::error!(
                    "Failed to post Discord ticket for RP application {}, removing it: {}",
                    application.id,
                    err
                );

                if let Err(delete_err) = repo.delete(application.id).await {
                    tracing::error!(
                        "Failed to remove RP application {} after Discord failure: {}",
                        application.id,
                        delete_err
                    );
                }

                return Err(err);
            }
        }

        Ok(application)
    }

    /// Posts the ticket and records its message ID on the application.
    ///
    /// A ticket whose ID cannot be recorded is deleted again so no unreachable ticket
    /// stays in the channel.
    async fn post_ticket(
        &self,
        repo: &RpApplicationRepository<'_>,
        application: &RpApplication,
        submitter: Option<&User>,
    ) -> Result<Option<String>, AppError> {
        let Some(message_id) = self.bridge.publish(application, submitter).await? else {
            return Ok(None);
        };

        if let Err(err) = repo
            .set_discord_message_id(application.id, &message_id)
            .await
        {
            if let Err(delete_err) = self.bridge.delete(&message_id).await {
                tracing::warn!(
                    "Failed to remove Discord message {} of RP application {}: {}",
                    message_id,
                    application.id,
                    delete_err
                );
            }
            return Err(err.into());
        }

        Ok(Some(message_id))
    }
}
