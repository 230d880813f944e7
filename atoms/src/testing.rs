//! In-memory `Store` and `Blobs` used by the service tests, with failure
//! injection and call recording so compensation paths can be asserted on.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ApiError;
use crate::gallery::model::GalleryEventRecord;
use crate::images::model::{ImagePatch, ImageRecord};
use crate::ports::{Blobs, Store};
use crate::texts::model::{TextPatch, TextRecord};
use crate::timeline::model::{TimelineEntry, TimelinePatch};

#[derive(Default)]
pub struct MemoryStore {
    texts: Mutex<HashMap<String, TextRecord>>,
    images: Mutex<HashMap<String, ImageRecord>>,
    events: Mutex<HashMap<String, GalleryEventRecord>>,
    timeline: Mutex<HashMap<String, TimelineEntry>>,

    calls: AtomicUsize,
    create_image_calls: AtomicUsize,
    fail_create_image_at: Mutex<Option<usize>>,
    fail_create_gallery_event: AtomicBool,
    fail_delete_image: AtomicBool,
}

impl MemoryStore {
    /// Make the n-th `create_image` call (1-based) fail.
    pub fn fail_create_image_at(&self, n: usize) {
        *self.fail_create_image_at.lock().unwrap() = Some(n);
    }

    pub fn fail_create_gallery_event(&self) {
        self.fail_create_gallery_event.store(true, Ordering::SeqCst);
    }

    pub fn fail_delete_image(&self) {
        self.fail_delete_image.store(true, Ordering::SeqCst);
    }

    /// Total number of store calls of any kind.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn image_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn gallery_event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    fn track(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn merge(target: &mut String, patch: Option<String>) {
    if let Some(value) = patch {
        *target = value;
    }
}

fn merge_opt(target: &mut Option<String>, patch: Option<String>) {
    if patch.is_some() {
        *target = patch;
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_text(&self, mut record: TextRecord) -> Result<TextRecord, ApiError> {
        self.track();
        record.id = Uuid::new_v4().to_string();
        self.texts.lock().unwrap().insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_text(&self, id: &str, patch: TextPatch) -> Result<TextRecord, ApiError> {
        self.track();
        let mut texts = self.texts.lock().unwrap();
        let record = texts.get_mut(id).ok_or(ApiError::NotFound("text"))?;
        merge(&mut record.slug, patch.slug);
        merge(&mut record.content, patch.content);
        merge_opt(&mut record.page_id, patch.page_id);
        merge_opt(&mut record.page_slug, patch.page_slug);
        record.updated_at = patch.updated_at;
        record.last_updated_by = patch.last_updated_by;
        Ok(record.clone())
    }

    async fn delete_text(&self, id: &str) -> Result<(), ApiError> {
        self.track();
        self.texts
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(ApiError::NotFound("text"))
    }

    async fn get_text(&self, id: &str) -> Result<TextRecord, ApiError> {
        self.track();
        self.texts
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(ApiError::NotFound("text"))
    }

    async fn get_text_by_slug(&self, slug: &str) -> Result<TextRecord, ApiError> {
        self.track();
        self.texts
            .lock()
            .unwrap()
            .values()
            .find(|t| t.slug == slug)
            .cloned()
            .ok_or(ApiError::NotFound("text"))
    }

    async fn list_texts(&self) -> Result<Vec<TextRecord>, ApiError> {
        self.track();
        Ok(self.texts.lock().unwrap().values().cloned().collect())
    }

    async fn list_texts_by_page(&self, page_slug: &str) -> Result<Vec<TextRecord>, ApiError> {
        self.track();
        Ok(self
            .texts
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.page_slug.as_deref() == Some(page_slug))
            .cloned()
            .collect())
    }

    async fn create_image(&self, mut record: ImageRecord) -> Result<ImageRecord, ApiError> {
        self.track();
        let call = self.create_image_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.fail_create_image_at.lock().unwrap() == Some(call) {
            return Err(ApiError::Backend(format!(
                "DynamoDB put_item error: injected failure on image write {call}"
            )));
        }
        record.id = Uuid::new_v4().to_string();
        self.images.lock().unwrap().insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_image(&self, id: &str, patch: ImagePatch) -> Result<ImageRecord, ApiError> {
        self.track();
        let mut images = self.images.lock().unwrap();
        let record = images.get_mut(id).ok_or(ApiError::NotFound("image"))?;
        merge(&mut record.name, patch.name);
        merge_opt(&mut record.slug, patch.slug);
        merge(&mut record.text, patch.text);
        merge_opt(&mut record.location, patch.location);
        if patch.date.is_some() {
            record.date = patch.date;
        }
        if let Some(url) = patch.object_url {
            record.object_url = url;
        }
        record.updated_at = patch.updated_at;
        record.last_updated_by = patch.last_updated_by;
        Ok(record.clone())
    }

    async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        self.track();
        if self.fail_delete_image.load(Ordering::SeqCst) {
            return Err(ApiError::Backend(
                "DynamoDB delete_item error: injected failure on image delete".to_string(),
            ));
        }
        self.images
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(ApiError::NotFound("image"))
    }

    async fn get_image(&self, id: &str) -> Result<ImageRecord, ApiError> {
        self.track();
        self.images
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(ApiError::NotFound("image"))
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError> {
        self.track();
        Ok(self.images.lock().unwrap().values().cloned().collect())
    }

    async fn list_images_by_slug(&self, slug: &str) -> Result<Vec<ImageRecord>, ApiError> {
        self.track();
        Ok(self
            .images
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.slug.as_deref() == Some(slug))
            .cloned()
            .collect())
    }

    async fn create_gallery_event(
        &self,
        mut record: GalleryEventRecord,
    ) -> Result<GalleryEventRecord, ApiError> {
        self.track();
        if self.fail_create_gallery_event.load(Ordering::SeqCst) {
            return Err(ApiError::Backend(
                "DynamoDB put_item error: injected failure on gallery event write".to_string(),
            ));
        }
        record.id = Uuid::new_v4().to_string();
        self.events.lock().unwrap().insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn get_gallery_event(&self, id: &str) -> Result<GalleryEventRecord, ApiError> {
        self.track();
        self.events
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(ApiError::NotFound("gallery event"))
    }

    async fn list_gallery_events(&self) -> Result<Vec<GalleryEventRecord>, ApiError> {
        self.track();
        let mut events: Vec<_> = self.events.lock().unwrap().values().cloned().collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }

    async fn delete_gallery_event(&self, id: &str) -> Result<(), ApiError> {
        self.track();
        self.events
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(ApiError::NotFound("gallery event"))
    }

    async fn create_timeline_entry(
        &self,
        mut record: TimelineEntry,
    ) -> Result<TimelineEntry, ApiError> {
        self.track();
        record.id = Uuid::new_v4().to_string();
        self.timeline.lock().unwrap().insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_timeline_entry(
        &self,
        id: &str,
        patch: TimelinePatch,
    ) -> Result<TimelineEntry, ApiError> {
        self.track();
        let mut timeline = self.timeline.lock().unwrap();
        let record = timeline.get_mut(id).ok_or(ApiError::NotFound("timeline entry"))?;
        merge(&mut record.name, patch.name);
        merge(&mut record.text, patch.text);
        merge(&mut record.location, patch.location);
        if let Some(date) = patch.date {
            record.date = date;
        }
        record.updated_at = patch.updated_at;
        record.last_updated_by = patch.last_updated_by;
        Ok(record.clone())
    }

    async fn delete_timeline_entry(&self, id: &str) -> Result<(), ApiError> {
        self.track();
        self.timeline
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(ApiError::NotFound("timeline entry"))
    }

    async fn get_timeline_entry(&self, id: &str) -> Result<TimelineEntry, ApiError> {
        self.track();
        self.timeline
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(ApiError::NotFound("timeline entry"))
    }

    async fn list_timeline_entries(&self) -> Result<Vec<TimelineEntry>, ApiError> {
        self.track();
        let mut entries: Vec<_> = self.timeline.lock().unwrap().values().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}

#[derive(Default)]
pub struct MemoryBlobs {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    puts: AtomicUsize,
    deletes: Mutex<Vec<String>>,
    fail_put: AtomicBool,
}

impl MemoryBlobs {
    pub fn fail_put(&self) {
        self.fail_put.store(true, Ordering::SeqCst);
    }

    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.lock().unwrap().len()
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Blobs for MemoryBlobs {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, ApiError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(ApiError::Backend(
                "S3 put_object error: injected failure".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(format!("https://blobs.test/{key}"))
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.deletes.lock().unwrap().push(key.to_string());
        // deleting an absent key is still a success
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in_secs: u64) -> Result<String, ApiError> {
        Ok(format!("https://blobs.test/{key}?expires={expires_in_secs}"))
    }
}
