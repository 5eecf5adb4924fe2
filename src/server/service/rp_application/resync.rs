use crate::server::{
    data::rp_application::RpApplicationRepository, error::AppError,
    service::rp_application::RpApplicationService,
};

impl<'a> RpApplicationService<'a> {
    /// Re-renders every Discord ticket that still offers actions.
    ///
    /// Repairs tickets left stale by failed edits. Failures are logged per application and
    /// do not stop the remaining ones.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of tickets refreshed
    /// - `Err(AppError)` - Listing the applications failed
    pub async fn resync_messages(&self) -> Result<usize, AppError> {
        if !self.bridge.is_enabled() {
            return Ok(0);
        }

        let applications = RpApplicationRepository::new(self.db)
            .find_with_open_ticket()
            .await?;

        let mut refreshed = 0;
        for application in &applications {
            match self.refresh_ticket(application).await {
                Ok(()) => refreshed += 1,
                Err(err) => tracing::warn!(
                    "Failed to resync Discord ticket of RP application {}: {}",
                    application.id,
                    err
                ),
            }
        }

        tracing::info!(
            "Resynced {} of {} RP application tickets",
            refreshed,
            applications.len()
        );

        Ok(refreshed)
    }
}
