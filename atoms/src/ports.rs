use async_trait::async_trait;

use crate::error::ApiError;
use crate::gallery::model::GalleryEventRecord;
use crate::images::model::{ImagePatch, ImageRecord};
use crate::texts::model::{TextPatch, TextRecord};
use crate::timeline::model::{TimelineEntry, TimelinePatch};

/// Structured-record CRUD against the document store.
///
/// Single-record operations only; every call is atomic from the store's point
/// of view but there are no multi-record transactions. Absent records surface
/// as `ApiError::NotFound`, everything else as `ApiError::Backend`.
#[async_trait]
pub trait Store: Send + Sync {
    // texts
    async fn create_text(&self, record: TextRecord) -> Result<TextRecord, ApiError>;
    async fn update_text(&self, id: &str, patch: TextPatch) -> Result<TextRecord, ApiError>;
    async fn delete_text(&self, id: &str) -> Result<(), ApiError>;
    async fn get_text(&self, id: &str) -> Result<TextRecord, ApiError>;
    async fn get_text_by_slug(&self, slug: &str) -> Result<TextRecord, ApiError>;
    async fn list_texts(&self) -> Result<Vec<TextRecord>, ApiError>;
    async fn list_texts_by_page(&self, page_slug: &str) -> Result<Vec<TextRecord>, ApiError>;

    // images
    async fn create_image(&self, record: ImageRecord) -> Result<ImageRecord, ApiError>;
    async fn update_image(&self, id: &str, patch: ImagePatch) -> Result<ImageRecord, ApiError>;
    async fn delete_image(&self, id: &str) -> Result<(), ApiError>;
    async fn get_image(&self, id: &str) -> Result<ImageRecord, ApiError>;
    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError>;
    async fn list_images_by_slug(&self, slug: &str) -> Result<Vec<ImageRecord>, ApiError>;

    // gallery events
    async fn create_gallery_event(
        &self,
        record: GalleryEventRecord,
    ) -> Result<GalleryEventRecord, ApiError>;
    async fn get_gallery_event(&self, id: &str) -> Result<GalleryEventRecord, ApiError>;
    async fn list_gallery_events(&self) -> Result<Vec<GalleryEventRecord>, ApiError>;
    async fn delete_gallery_event(&self, id: &str) -> Result<(), ApiError>;

    // timeline
    async fn create_timeline_entry(&self, record: TimelineEntry) -> Result<TimelineEntry, ApiError>;
    async fn update_timeline_entry(
        &self,
        id: &str,
        patch: TimelinePatch,
    ) -> Result<TimelineEntry, ApiError>;
    async fn delete_timeline_entry(&self, id: &str) -> Result<(), ApiError>;
    async fn get_timeline_entry(&self, id: &str) -> Result<TimelineEntry, ApiError>;
    async fn list_timeline_entries(&self) -> Result<Vec<TimelineEntry>, ApiError>;
}

/// Binary object storage.
///
/// `put` returns a stable locator (public or CDN URL) for the stored object.
/// `delete` is idempotent: deleting a key that does not exist succeeds.
#[async_trait]
pub trait Blobs: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, ApiError>;
    async fn delete(&self, key: &str) -> Result<(), ApiError>;
    async fn signed_url(&self, key: &str, expires_in_secs: u64) -> Result<String, ApiError>;
}
