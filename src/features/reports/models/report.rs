use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted report record
///
/// Field names follow the on-disk document layout (`submittedAt` is camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub location: String,
    /// Category slug as submitted; unknown slugs are kept verbatim
    pub category: String,
    pub description: String,
    /// Base64 data URI (`data:<mime>;base64,<payload>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Data for creating a new report
///
/// `id` and `submitted_at` are deliberately absent: only the report service
/// assigns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub location: String,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
}
