use crate::server::{
    data::{
        rp_application::RpApplicationRepository, verification_code::VerificationCodeRepository,
    },
    error::AppError,
    model::rp_application::RpApplicationStatus,
    service::rp_application::RpApplicationService,
};

impl<'a> RpApplicationService<'a> {
    /// Deletes an application of the caller together with its ticket and codes.
    ///
    /// The Discord ticket is removed first so that a bridge failure leaves the application
    /// untouched.
    ///
    /// # Arguments
    /// - `owner` - Discord ID of the caller
    /// - `id` - Application to delete
    ///
    /// # Returns
    /// - `Ok(())` - Application deleted
    /// - `Err(AppError::NotFound)` - Application does not exist
    /// - `Err(AppError::Forbidden)` - Application belongs to someone else
    /// - `Err(AppError::Conflict)` - Application is accepted
    /// - `Err(AppError::BridgeErr)` - Deleting the ticket failed, nothing was deleted
    pub async fn delete(&self, owner: u64, id: i32) -> Result<(), AppError> {
        let repo = RpApplicationRepository::new(self.db);

        let Some(application) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("rp application not found".to_string()));
        };
        if application.discord_id != owner {
            return Err(AppError::Forbidden(
                "rp application belongs to another user".to_string(),
            ));
        }
        if application.status == RpApplicationStatus::Accepted {
            return Err(AppError::Conflict(
                "accepted application cannot be deleted".to_string(),
            ));
        }

        if let Some(message_id) = application.discord_message_id.as_deref() {
            self.bridge.delete(message_id).await?;
        }

        VerificationCodeRepository::new(self.db)
            .delete_by_application(id)
            .await?;
        repo.delete(id).await?;

        tracing::info!("RP application {} deleted by its owner {}", id, owner);

        Ok(())
    }
}
