use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// RP character application as submitted by the site form.
///
/// Every field is trimmed before validation. Missing fields deserialize as empty strings
/// so that validation, not deserialization, reports them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitRpApplicationDto {
    /// Minecraft nickname, 3-16 characters of `[A-Za-z0-9_]`.
    pub nickname: String,
    /// Where the applicant heard about the server.
    pub source: String,
    /// Character first and last name.
    pub rp_name: String,
    /// Character birth date as `YYYY-MM-DD`.
    pub birth_date: String,
    pub race: String,
    pub gender: String,
    pub skills: String,
    pub plan: String,
    /// Character biography, at least five sentences.
    pub biography: String,
    /// HTTPS link to a png, jpg, jpeg or webp skin image.
    pub skin_url: String,
}

/// Response to a successful submission.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRpApplicationResponseDto {
    pub status: String,
    pub application_id: i32,
}

/// Short projection of an application shown on the profile page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RpApplicationSummaryDto {
    pub id: i32,
    /// `pending`, `accepted` or `canceled`.
    pub status: String,
    pub nickname: String,
    pub rp_name: String,
    pub race: String,
    pub gender: String,
    pub birth_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub moderated_at: Option<DateTime<Utc>>,
}

/// Latest application of the current user, if any.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LatestRpApplicationDto {
    pub application: Option<RpApplicationSummaryDto>,
}
