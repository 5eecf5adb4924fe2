use std::str::FromStr;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses an ID taken from a URL path.
///
/// An ID that does not parse cannot name an existing resource, so it is answered like a
/// missing one.
///
/// # Returns
/// - `Ok(T)` - Parsed ID
/// - `Err(AppError::NotFound)` - Not a valid ID, carrying `not_found` as message
pub fn parse_path_id<T: FromStr>(raw: &str, not_found: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::NotFound(not_found.to_string()))
}
