//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`; the HTTP layer rejects
//! invalid bodies before a service sees them.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use chatdeck_core::entities::MemoChanges;

// ============================================================================
// Chat History
// ============================================================================

/// Query string of `GET /api/messages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub channel: Option<String>,
    /// Missing or zero means the configured default
    ///
    /// Values that are not a non-negative integer (`limit=`, `limit=abc`,
    /// `limit=-1`) read as missing.
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<usize>,
}

fn lenient_limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

// ============================================================================
// Memo Requests
// ============================================================================

/// Create memo request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 20000, message = "Content must be at most 20000 characters"))]
    pub content: String,

    /// Owner; `"anonymous"` when omitted
    pub user_id: Option<String>,
}

/// Partial memo update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 20000, message = "Content must be at most 20000 characters"))]
    pub content: Option<String>,
}

impl From<UpdateMemoRequest> for MemoChanges {
    fn from(request: UpdateMemoRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
        }
    }
}
