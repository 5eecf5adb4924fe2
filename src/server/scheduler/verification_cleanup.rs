use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::verification::VerificationService};

/// Every ten minutes, on the minute.
const CLEANUP_SCHEDULE: &str = "0 */10 * * * *";

/// Starts the verification code cleanup scheduler.
///
/// The job deletes codes that were used or have expired. The returned scheduler must be
/// kept alive for the job to keep running.
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = cleanup_verification_codes(&db).await {
                tracing::error!("Error cleaning up verification codes: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Verification code cleanup scheduler started");

    Ok(scheduler)
}

async fn cleanup_verification_codes(db: &DatabaseConnection) -> Result<(), AppError> {
    let removed = VerificationService::new(db).cleanup_stale().await?;

    if removed > 0 {
        tracing::debug!("Removed {} stale verification codes", removed);
    }

    Ok(())
}
