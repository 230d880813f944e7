use serde::{Deserialize, Serialize};

/// Text fragment - a block of page copy keyed by a canonical slug.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TextRecord {
    pub id: String,
    pub slug: String,
    pub content: String,
    pub page_id: Option<String>,
    pub page_slug: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub last_updated_by: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTextPayload {
    pub slug: String,
    pub content: String,
    pub page_id: Option<String>,
    pub page_slug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTextPayload {
    pub slug: Option<String>,
    pub content: Option<String>,
    pub page_id: Option<String>,
    pub page_slug: Option<String>,
}

/// Field-by-field merge applied by the store; `None` means "leave as is".
#[derive(Debug, Clone)]
pub struct TextPatch {
    pub slug: Option<String>,
    pub content: Option<String>,
    pub page_id: Option<String>,
    pub page_slug: Option<String>,
    pub updated_at: String,
    pub last_updated_by: String,
}
