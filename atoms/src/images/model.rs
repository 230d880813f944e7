use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest accepted binary payload for a single image.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image metadata record. Owns exactly one blob at a time; `object_url` is
/// the locator returned by the blob store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageRecord {
    pub id: String,
    pub slug: Option<String>,
    pub object_url: String,
    pub name: String,
    pub text: String,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub last_updated_by: String,
}

/// Metadata for a fresh upload, before a blob or id exists.
#[derive(Debug, Clone, Default)]
pub struct NewImage {
    pub name: String,
    pub slug: Option<String>,
    pub text: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateImagePayload {
    pub name: String,
    pub slug: Option<String>,
    pub text: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Base64-encoded binary payload.
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateImagePayload {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub text: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    /// Base64-encoded replacement payload; absent or empty means
    /// metadata-only update.
    pub data: Option<String>,
}

/// Field-by-field merge applied by the store; `None` means "leave as is".
#[derive(Debug, Clone, Default)]
pub struct ImagePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub text: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub object_url: Option<String>,
    pub updated_at: String,
    pub last_updated_by: String,
}
