//! Generation of moderation link tokens.

use chrono::Utc;
use rand::{rngs::OsRng, TryRngCore};

/// Issues the secrets embedded in moderation links.
#[derive(Debug, Clone, Copy)]
pub struct ModerationTokenIssuer {
    byte_len: usize,
}

impl ModerationTokenIssuer {
    /// Creates an issuer producing `byte_len` random bytes per token.
    ///
    /// The hex-encoded token is twice as long as `byte_len`.
    pub fn new(byte_len: usize) -> Self {
        Self { byte_len }
    }

    /// Issues a token from the operating system's random source.
    pub fn issue(&self) -> String {
        self.issue_with(&mut OsRng)
    }

    /// Issues a token from `rng`.
    ///
    /// When the source fails the token degrades to `fallback` followed by the current time
    /// in hex nanoseconds, and a warning is logged.
    ///
    /// # Arguments
    /// - `rng` - Fallible random source
    ///
    /// # Returns
    /// - `String` - Lowercase hex token
    pub fn issue_with<R: TryRngCore>(&self, rng: &mut R) -> String {
        let mut bytes = vec![0u8; self.byte_len];

        match rng.try_fill_bytes(&mut bytes) {
            Ok(()) => hex::encode(bytes),
            Err(err) => {
                tracing::warn!(
                    "Random source failed, issuing time-based moderation token: {}",
                    err
                );

                let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
                format!("fallback{:x}", nanos)
            }
        }
    }
}
