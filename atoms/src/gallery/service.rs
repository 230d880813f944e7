use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;

use super::model::{CreateGalleryEventPayload, GalleryEventRecord};
use crate::error::ApiError;
use crate::images::model::NewImage;
use crate::images::service as images;
use crate::ports::{Blobs, Store};
use crate::slug::{event_image_key, normalize};

/// Create a gallery event and its images as one logical unit.
///
/// The document store and the blob store share no transaction, so this runs
/// as a saga: images are created strictly in input order, and the ids of the
/// ones that succeeded (`committed`) are the compensation list. Any failure -
/// a decode error, an image upload, or the final aggregate write - deletes
/// every committed image again and returns the triggering error. Compensation
/// itself is best effort: a failed compensating delete is logged and leaves
/// residue, it never masks the original error.
///
/// The aggregate record is written once, after every image saga succeeded, so
/// readers never observe it partially populated.
pub async fn create_gallery_event(
    store: &dyn Store,
    blobs: &dyn Blobs,
    payload: CreateGalleryEventPayload,
    updated_by: &str,
) -> Result<GalleryEventRecord, ApiError> {
    // Fail fast, before any side effect.
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name"));
    }
    if payload.location.trim().is_empty() {
        return Err(ApiError::Validation("location"));
    }
    let date = match payload.date {
        Some(date) if date.timestamp() != 0 => date,
        _ => return Err(ApiError::Validation("date")),
    };
    if payload.images.is_empty() {
        return Err(ApiError::Validation("images"));
    }

    let slug = normalize(&payload.name);
    let mut committed: Vec<String> = Vec::with_capacity(payload.images.len());
    let mut image_urls: Vec<String> = Vec::with_capacity(payload.images.len());

    for (index, encoded) in payload.images.iter().enumerate() {
        let data = match BASE64.decode(encoded) {
            Ok(data) => data,
            Err(_) => {
                compensate(store, blobs, &committed).await;
                return Err(ApiError::Decode { index });
            }
        };

        let key = event_image_key(&slug, date, index);
        let meta = NewImage {
            name: format!("{} {}", payload.name, index + 1),
            slug: Some(slug.clone()),
            text: Some(format!("{} - {}", payload.name, payload.location)),
            date: Some(date),
            location: Some(payload.location.clone()),
        };

        match images::upload_with_key(store, blobs, meta, data, &key, updated_by).await {
            Ok(image) => {
                image_urls.push(image.object_url);
                committed.push(image.id);
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "gallery image creation failed, rolling back committed images");
                compensate(store, blobs, &committed).await;
                return Err(e);
            }
        }
    }

    let now = Utc::now().to_rfc3339();
    let record = GalleryEventRecord {
        id: String::new(),
        name: payload.name,
        location: payload.location,
        date,
        image_urls,
        image_ids: committed.clone(),
        created_at: now.clone(),
        updated_at: now,
        last_updated_by: updated_by.to_string(),
    };

    match store.create_gallery_event(record).await {
        Ok(persisted) => Ok(persisted),
        Err(e) => {
            tracing::warn!(error = %e, "gallery event write failed, rolling back committed images");
            compensate(store, blobs, &committed).await;
            Err(e)
        }
    }
}

/// Best-effort rollback of every committed image. Each delete is attempted
/// even when earlier ones fail; failures leave orphaned records or blobs and
/// are only logged.
async fn compensate(store: &dyn Store, blobs: &dyn Blobs, committed: &[String]) {
    for id in committed {
        if let Err(e) = images::delete(store, blobs, id).await {
            tracing::warn!(image_id = %id, error = %e, "orphaned image: compensating delete did not succeed");
        }
    }
}

pub async fn get_gallery_event(
    store: &dyn Store,
    id: &str,
) -> Result<GalleryEventRecord, ApiError> {
    store.get_gallery_event(id).await
}

/// Events ordered by date, newest first.
pub async fn list_gallery_events(store: &dyn Store) -> Result<Vec<GalleryEventRecord>, ApiError> {
    store.list_gallery_events().await
}

/// Deletes only the event record. The referenced images and blobs stay: they
/// may be grouped or linked elsewhere, so removal is never cascaded.
pub async fn delete_gallery_event(store: &dyn Store, id: &str) -> Result<(), ApiError> {
    store.delete_gallery_event(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryBlobs, MemoryStore};
    use chrono::TimeZone;

    fn valid_date() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
    }

    fn payload(images: Vec<String>) -> CreateGalleryEventPayload {
        CreateGalleryEventPayload {
            name: "Meetup".to_string(),
            location: "SP".to_string(),
            date: Some(valid_date()),
            images,
        }
    }

    fn encoded(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    #[tokio::test]
    async fn success_populates_parallel_ordered_lists() {
        let store = MemoryStore::default();
        let blobs = MemoryBlobs::default();

        let event = create_gallery_event(
            &store,
            &blobs,
            payload(vec![encoded(&[1]), encoded(&[2]), encoded(&[3])]),
            "admin",
        )
        .await
        .unwrap();

        assert_eq!(event.image_urls.len(), 3);
        assert_eq!(event.image_ids.len(), 3);
        assert_eq!(store.image_count(), 3);
        assert_eq!(blobs.object_count(), 3);

        // render order is creation order
        for (id, url) in event.image_ids.iter().zip(&event.image_urls) {
            let image = store.get_image(id).await.unwrap();
            assert_eq!(&image.object_url, url);
        }
    }

    #[tokio::test]
    async fn validation_fails_before_any_backend_call() {
        let store = MemoryStore::default();
        let blobs = MemoryBlobs::default();

        let mut p = payload(vec![encoded(&[1])]);
        p.name = String::new();
        let err = create_gallery_event(&store, &blobs, p, "admin").await.unwrap_err();

        assert!(matches!(err, ApiError::Validation("name")));
        assert_eq!(store.call_count(), 0);
        assert_eq!(blobs.put_calls(), 0);
        assert_eq!(blobs.delete_calls(), 0);
    }

    #[tokio::test]
    async fn missing_date_and_empty_images_are_rejected() {
        let store = MemoryStore::default();
        let blobs = MemoryBlobs::default();

        let mut p = payload(vec![encoded(&[1])]);
        p.date = None;
        let err = create_gallery_event(&store, &blobs, p, "admin").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation("date")));

        let err = create_gallery_event(&store, &blobs, payload(vec![]), "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation("images")));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn decode_failure_aborts_and_rolls_back_the_prefix() {
        let store = MemoryStore::default();
        let blobs = MemoryBlobs::default();

        let err = create_gallery_event(
            &store,
            &blobs,
            payload(vec![encoded(&[1]), "not-base64!!".to_string()]),
            "admin",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Decode { index: 1 }));
        assert_eq!(store.image_count(), 0);
        assert_eq!(store.gallery_event_count(), 0);
        assert_eq!(blobs.object_count(), 0);
    }

    #[tokio::test]
    async fn upload_failure_rolls_back_exactly_the_committed_prefix() {
        let store = MemoryStore::default();
        // third image metadata write fails
        store.fail_create_image_at(3);
        let blobs = MemoryBlobs::default();

        let err = create_gallery_event(
            &store,
            &blobs,
            payload(vec![encoded(&[1]), encoded(&[2]), encoded(&[3]), encoded(&[4])]),
            "admin",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Backend(_)));
        assert_eq!(store.image_count(), 0);
        assert_eq!(store.gallery_event_count(), 0);
        assert_eq!(blobs.object_count(), 0);
        // two committed images compensated, plus the failed item's own cleanup
        assert_eq!(blobs.delete_calls(), 3);
    }

    #[tokio::test]
    async fn aggregate_write_failure_rolls_back_every_image() {
        let store = MemoryStore::default();
        store.fail_create_gallery_event();
        let blobs = MemoryBlobs::default();

        let err = create_gallery_event(
            &store,
            &blobs,
            payload(vec![encoded(&[1]), encoded(&[2])]),
            "admin",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Backend(_)));
        assert_eq!(store.image_count(), 0);
        assert_eq!(store.gallery_event_count(), 0);
        assert_eq!(blobs.object_count(), 0);
    }

    #[tokio::test]
    async fn compensation_failure_never_masks_the_original_error() {
        let store = MemoryStore::default();
        store.fail_create_gallery_event();
        store.fail_delete_image();
        let blobs = MemoryBlobs::default();

        let err = create_gallery_event(
            &store,
            &blobs,
            payload(vec![encoded(&[1]), encoded(&[2])]),
            "admin",
        )
        .await
        .unwrap_err();

        // the aggregate-write error, not the compensation error
        assert!(matches!(err, ApiError::Backend(ref msg) if msg.contains("gallery")));
        // residue: the image records stay behind
        assert_eq!(store.image_count(), 2);
    }

    #[tokio::test]
    async fn deleting_an_event_leaves_its_images_and_blobs() {
        let store = MemoryStore::default();
        let blobs = MemoryBlobs::default();

        let event = create_gallery_event(
            &store,
            &blobs,
            payload(vec![encoded(&[1]), encoded(&[2])]),
            "admin",
        )
        .await
        .unwrap();

        delete_gallery_event(&store, &event.id).await.unwrap();

        assert_eq!(store.gallery_event_count(), 0);
        assert_eq!(store.image_count(), 2);
        assert_eq!(blobs.object_count(), 2);
        for id in &event.image_ids {
            store.get_image(id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn listing_orders_by_date_descending() {
        let store = MemoryStore::default();
        let blobs = MemoryBlobs::default();

        for (name, year) in [("Old", 2020), ("New", 2024), ("Mid", 2022)] {
            let p = CreateGalleryEventPayload {
                name: name.to_string(),
                location: "SP".to_string(),
                date: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
                images: vec![encoded(&[1])],
            };
            create_gallery_event(&store, &blobs, p, "admin").await.unwrap();
        }

        let events = list_gallery_events(&store).await.unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);
    }
}
