use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gallery event - an event record backed by a set of uploaded images.
///
/// `image_urls` and `image_ids` are parallel, creation-ordered lists and are
/// both non-empty for any record that completed creation. The ids are
/// back-references, not ownership: deleting the event leaves the images and
/// their blobs in place.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GalleryEventRecord {
    pub id: String,
    pub name: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_urls: Vec<String>,
    pub image_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub last_updated_by: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateGalleryEventPayload {
    pub name: String,
    pub location: String,
    pub date: Option<DateTime<Utc>>,
    /// Base64-encoded image payloads, in render order.
    pub images: Vec<String>,
}
