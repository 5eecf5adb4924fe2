use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing JSON endpoint.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Plain acknowledgement body (`{"status": "ok"}`).
#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    pub status: String,
}

impl StatusDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
