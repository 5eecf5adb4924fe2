//! RP application domain models, status machine and parameters.
//!
//! Applications move through `pending`, `accepted` and `canceled`. Moderators act through
//! links carrying a per-episode token; `ModerationAction` names those actions and
//! `RpApplicationStatus::apply` decides which transitions are legal.

use chrono::{DateTime, Utc};

use crate::{
    model::rp_application::{RpApplicationSummaryDto, SubmitRpApplicationDto},
    server::{
        error::{storage::StorageError, AppError},
        util::parse::parse_u64_from_string,
    },
};

/// Lifecycle status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpApplicationStatus {
    /// Waiting for a moderator. Initial state.
    Pending,
    /// Approved by a moderator. Can be reconsidered back to pending.
    Accepted,
    /// Declined by a moderator. Terminal.
    Canceled,
}

impl RpApplicationStatus {
    /// Decodes a stored status, accepting the legacy `approved` and `rejected` spellings.
    ///
    /// # Returns
    /// - `Some(status)` - Known status
    /// - `None` - Value outside the vocabulary
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" | "approved" => Some(Self::Accepted),
            "canceled" | "rejected" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Canonical spelling written to the database and the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Canceled => "canceled",
        }
    }

    /// Every spelling that decodes to this status, legacy ones included.
    pub fn stored_spellings(&self) -> &'static [&'static str] {
        match self {
            Self::Pending => &["pending"],
            Self::Accepted => &["accepted", "approved"],
            Self::Canceled => &["canceled", "rejected"],
        }
    }

    /// Human readable label shown in the Discord ticket.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending review",
            Self::Accepted => "Accepted",
            Self::Canceled => "Canceled",
        }
    }

    /// Computes the status reached by applying `action`.
    ///
    /// # Returns
    /// - `Some(next)` - Transition is allowed
    /// - `None` - Transition is not allowed from this status
    pub fn apply(self, action: ModerationAction) -> Option<Self> {
        match (self, action) {
            (Self::Pending, ModerationAction::Accept) => Some(Self::Accepted),
            (Self::Pending, ModerationAction::Cancel) => Some(Self::Canceled),
            (Self::Accepted, ModerationAction::Reconsider) => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Action requested through a moderation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Accept,
    Cancel,
    Reconsider,
}

impl ModerationAction {
    /// Normalizes a raw action string from a link.
    ///
    /// Case-insensitive and trimmed. Older links used `approve` and `reject`, which map to
    /// `accept` and `cancel`.
    ///
    /// # Returns
    /// - `Some(action)` - Recognized action
    /// - `None` - Unknown action
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "accept" | "approve" => Some(Self::Accept),
            "cancel" | "reject" => Some(Self::Cancel),
            "reconsider" => Some(Self::Reconsider),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Cancel => "cancel",
            Self::Reconsider => "reconsider",
        }
    }
}

/// Free-text fields of an application as entered by the applicant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RpApplicationFields {
    pub nickname: String,
    pub source: String,
    pub rp_name: String,
    pub birth_date: String,
    pub race: String,
    pub gender: String,
    pub skills: String,
    pub plan: String,
    pub biography: String,
    pub skin_url: String,
}

impl RpApplicationFields {
    /// Converts the submission DTO, trimming every field.
    pub fn from_dto(dto: SubmitRpApplicationDto) -> Self {
        let trim = |value: String| value.trim().to_string();

        Self {
            nickname: trim(dto.nickname),
            source: trim(dto.source),
            rp_name: trim(dto.rp_name),
            birth_date: trim(dto.birth_date),
            race: trim(dto.race),
            gender: trim(dto.gender),
            skills: trim(dto.skills),
            plan: trim(dto.plan),
            biography: trim(dto.biography),
            skin_url: trim(dto.skin_url),
        }
    }
}

/// Persisted RP application.
#[derive(Debug, Clone, PartialEq)]
pub struct RpApplication {
    pub id: i32,
    /// Discord ID of the applicant.
    pub discord_id: u64,
    pub fields: RpApplicationFields,
    pub status: RpApplicationStatus,
    /// Secret authorizing moderation links for the current pending episode.
    pub moderation_token: String,
    /// ID of the Discord webhook message mirroring this application.
    pub discord_message_id: Option<String>,
    pub moderated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RpApplication {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(RpApplication)` - Converted model
    /// - `Err(AppError::StorageErr(UnknownApplicationStatus))` - Stored status is unknown
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored Discord ID is not numeric
    pub fn from_entity(entity: entity::rp_application::Model) -> Result<Self, AppError> {
        let status = RpApplicationStatus::from_stored(&entity.status).ok_or(
            StorageError::UnknownApplicationStatus {
                application_id: entity.id,
                status: entity.status.clone(),
            },
        )?;
        let discord_id = parse_u64_from_string(entity.discord_id)?;
        let discord_message_id = entity
            .discord_message_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(Self {
            id: entity.id,
            discord_id,
            fields: RpApplicationFields {
                nickname: entity.nickname,
                source: entity.source,
                rp_name: entity.rp_name,
                birth_date: entity.birth_date,
                race: entity.race,
                gender: entity.gender,
                skills: entity.skills,
                plan: entity.plan,
                biography: entity.biography,
                skin_url: entity.skin_url,
            },
            status,
            moderation_token: entity.moderation_token,
            discord_message_id,
            moderated_at: entity.moderated_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Projects the application to the summary shown on the profile page.
    pub fn into_summary_dto(self) -> RpApplicationSummaryDto {
        RpApplicationSummaryDto {
            id: self.id,
            status: self.status.as_str().to_string(),
            nickname: self.fields.nickname,
            rp_name: self.fields.rp_name,
            race: self.fields.race,
            gender: self.fields.gender,
            birth_date: self.fields.birth_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            moderated_at: self.moderated_at,
        }
    }
}

/// Parameters for inserting a new pending application.
#[derive(Debug, Clone)]
pub struct CreateRpApplicationParam {
    pub discord_id: u64,
    pub fields: RpApplicationFields,
    pub moderation_token: String,
}

/// Parameters for a guarded status update.
///
/// The update only matches while the row still has `expected_status` and
/// `expected_token`, so concurrent link clicks cannot both apply.
#[derive(Debug, Clone)]
pub struct ApplyTransitionParam {
    pub id: i32,
    pub expected_status: RpApplicationStatus,
    pub expected_token: String,
    pub next_status: RpApplicationStatus,
    pub moderation_token: String,
    pub moderated_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Result of following a moderation link.
#[derive(Debug, Clone)]
pub struct ModerationOutcome {
    /// Application state after the call.
    pub application: RpApplication,
    pub action: ModerationAction,
    /// `false` when the transition was not allowed and nothing changed.
    pub applied: bool,
}
