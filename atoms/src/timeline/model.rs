use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timeline entry - a dated milestone with no blob attachment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimelineEntry {
    pub id: String,
    pub name: String,
    pub text: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub created_at: String,
    pub updated_at: String,
    pub last_updated_by: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTimelinePayload {
    pub name: String,
    pub text: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTimelinePayload {
    pub name: Option<String>,
    pub text: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Field-by-field merge applied by the store; `None` means "leave as is".
#[derive(Debug, Clone)]
pub struct TimelinePatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub updated_at: String,
    pub last_updated_by: String,
}
