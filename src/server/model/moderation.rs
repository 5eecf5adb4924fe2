//! Access rules for anonymous moderation links.

use std::{collections::HashSet, str::FromStr};

use crate::server::error::AppError;

/// Who may follow a moderation link from a Discord ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModerationLinkPolicy {
    /// Possession of the link token is enough.
    TokenOnly,
    /// The token plus a logged-in account on the moderator allow-list.
    #[default]
    TokenAndModerator,
}

impl FromStr for ModerationLinkPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(Self::TokenOnly),
            "moderator" => Ok(Self::TokenAndModerator),
            other => Err(format!(
                "unknown policy '{}', expected 'token' or 'moderator'",
                other
            )),
        }
    }
}

/// Discord IDs allowed to act on moderation links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeratorAllowList {
    ids: HashSet<u64>,
}

impl ModeratorAllowList {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Parses a comma-separated list of Discord IDs, skipping blank entries.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|_| format!("'{}' is not a Discord ID", id))
            })
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self { ids })
    }

    pub fn contains(&self, discord_id: u64) -> bool {
        self.ids.contains(&discord_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Policy and allow-list applied when a moderation link is followed.
#[derive(Debug, Clone, Default)]
pub struct ModerationAccess {
    pub policy: ModerationLinkPolicy,
    pub moderators: ModeratorAllowList,
}

impl ModerationAccess {
    pub fn new(policy: ModerationLinkPolicy, moderators: ModeratorAllowList) -> Self {
        Self { policy, moderators }
    }

    /// Checks whether the caller may act on a moderation link.
    ///
    /// # Arguments
    /// - `caller` - Discord ID of the logged-in user, if any
    ///
    /// # Returns
    /// - `Ok(())` - Access granted
    /// - `Err(AppError::Unauthorized)` - Moderator policy and nobody logged in
    /// - `Err(AppError::Forbidden)` - Moderator policy and caller not on the allow-list
    pub fn authorize(&self, caller: Option<u64>) -> Result<(), AppError> {
        match self.policy {
            ModerationLinkPolicy::TokenOnly => Ok(()),
            ModerationLinkPolicy::TokenAndModerator => match caller {
                None => Err(AppError::Unauthorized(
                    "moderator auth required".to_string(),
                )),
                Some(id) if self.moderators.contains(id) => Ok(()),
                Some(_) => Err(AppError::Forbidden(
                    "moderator access required".to_string(),
                )),
            },
        }
    }
}
