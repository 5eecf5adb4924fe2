use thiserror::Error;

/// Persisted rows that do not decode into a valid domain model.
///
/// Always results in 500 Internal Server Error. Never silently defaulted.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored application status is outside the known vocabulary.
    #[error("RP application {application_id} has unknown stored status '{status}'")]
    UnknownApplicationStatus {
        /// ID of the offending application row
        application_id: i32,
        /// The raw stored status value
        status: String,
    },
}
