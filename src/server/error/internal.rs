use std::num::ParseIntError;
use thiserror::Error;

/// Failures that point at a bug or corrupt data rather than at the caller.
///
/// Always answered with 500 Internal Server Error and a generic message.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored Discord ID is not a valid `u64`.
    #[error("Stored ID '{value}' is not numeric: {source}")]
    ParseStringId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A row written moments ago could not be read back.
    #[error("RP application {0} disappeared during processing")]
    ApplicationVanished(i32),
}
