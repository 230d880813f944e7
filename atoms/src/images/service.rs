use chrono::Utc;

use super::model::{ImagePatch, ImageRecord, NewImage, UpdateImagePayload, MAX_IMAGE_BYTES};
use crate::error::ApiError;
use crate::ports::{Blobs, Store};
use crate::slug::{key_from_locator, normalize, object_key};
use crate::texts::service::non_empty;

fn content_type(data: &[u8]) -> &'static str {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if data.starts_with(b"GIF8") {
        "image/gif"
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

fn check_size(data: &[u8]) -> Result<(), ApiError> {
    if data.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::PayloadTooLarge {
            size: data.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Upload a blob and persist its metadata record.
///
/// The two writes have no shared transaction: if the store write fails the
/// just-uploaded blob is deleted again, best effort. A failed cleanup leaves
/// an orphaned blob and is logged, never surfaced.
pub async fn upload(
    store: &dyn Store,
    blobs: &dyn Blobs,
    meta: NewImage,
    data: Vec<u8>,
    updated_by: &str,
) -> Result<ImageRecord, ApiError> {
    check_size(&data)?;
    let slug = non_empty(meta.slug.clone()).map(|s| normalize(&s));
    let key = object_key(slug.as_deref().unwrap_or(""), 0, Utc::now());
    upload_with_key(store, blobs, NewImage { slug, ..meta }, data, &key, updated_by).await
}

/// Same as [`upload`] but with a caller-supplied object key. The gallery
/// saga uses this to give every item of one event a unique key.
pub(crate) async fn upload_with_key(
    store: &dyn Store,
    blobs: &dyn Blobs,
    meta: NewImage,
    data: Vec<u8>,
    key: &str,
    updated_by: &str,
) -> Result<ImageRecord, ApiError> {
    check_size(&data)?;
    let kind = content_type(&data);
    let locator = blobs.put(key, data, kind).await?;

    let now = Utc::now().to_rfc3339();
    let record = ImageRecord {
        id: String::new(),
        slug: meta.slug,
        object_url: locator,
        name: meta.name,
        text: meta.text.unwrap_or_default(),
        date: meta.date,
        location: meta.location,
        created_at: now.clone(),
        updated_at: now,
        last_updated_by: updated_by.to_string(),
    };

    match store.create_image(record).await {
        Ok(persisted) => Ok(persisted),
        Err(e) => {
            if let Err(cleanup) = blobs.delete(key).await {
                tracing::warn!(key, error = %cleanup, "orphaned blob: cleanup after failed metadata write did not succeed");
            }
            Err(e)
        }
    }
}

/// Patch image metadata, optionally replacing the binary payload.
///
/// With new data present the old blob is deleted only after the new locator
/// is durably referenced by the updated record; a failed old-blob delete is
/// residue, not an error. If the metadata merge fails the new blob is
/// removed again.
pub async fn update(
    store: &dyn Store,
    blobs: &dyn Blobs,
    id: &str,
    payload: UpdateImagePayload,
    data: Option<Vec<u8>>,
    updated_by: &str,
) -> Result<ImageRecord, ApiError> {
    let mut patch = ImagePatch {
        name: non_empty(payload.name),
        slug: non_empty(payload.slug).map(|s| normalize(&s)),
        text: non_empty(payload.text),
        date: payload.date,
        location: non_empty(payload.location),
        object_url: None,
        updated_at: Utc::now().to_rfc3339(),
        last_updated_by: updated_by.to_string(),
    };

    let data = data.filter(|d| !d.is_empty());
    let Some(data) = data else {
        // Pure metadata patch, no blob interaction.
        return store.update_image(id, patch).await;
    };

    check_size(&data)?;
    let existing = store.get_image(id).await?;
    let slug = patch
        .slug
        .clone()
        .or_else(|| existing.slug.clone())
        .unwrap_or_default();
    // Sequence 1 keeps the replacement key distinct from the original
    // upload's key even within the same wall-clock second.
    let new_key = object_key(&slug, 1, Utc::now());
    let kind = content_type(&data);
    let locator = blobs.put(&new_key, data, kind).await?;
    patch.object_url = Some(locator);

    match store.update_image(id, patch).await {
        Ok(updated) => {
            let old_key = key_from_locator(&existing.object_url).to_string();
            if let Err(cleanup) = blobs.delete(&old_key).await {
                tracing::warn!(key = %old_key, error = %cleanup, "orphaned blob: replaced object was not deleted");
            }
            Ok(updated)
        }
        Err(e) => {
            if let Err(cleanup) = blobs.delete(&new_key).await {
                tracing::warn!(key = %new_key, error = %cleanup, "orphaned blob: cleanup after failed metadata merge did not succeed");
            }
            Err(e)
        }
    }
}

/// Delete the metadata record, then the blob.
///
/// The store record goes first: a dangling blob is acceptable residue, a
/// record pointing at a deleted blob is not.
pub async fn delete(store: &dyn Store, blobs: &dyn Blobs, id: &str) -> Result<(), ApiError> {
    let image = store.get_image(id).await?;
    store.delete_image(id).await?;

    let key = key_from_locator(&image.object_url).to_string();
    if let Err(cleanup) = blobs.delete(&key).await {
        tracing::warn!(key = %key, error = %cleanup, "orphaned blob: delete after record removal did not succeed");
    }
    Ok(())
}

pub async fn get_image(store: &dyn Store, id: &str) -> Result<ImageRecord, ApiError> {
    store.get_image(id).await
}

pub async fn list_images(store: &dyn Store) -> Result<Vec<ImageRecord>, ApiError> {
    store.list_images().await
}

pub async fn list_images_by_slug(
    store: &dyn Store,
    slug: &str,
) -> Result<Vec<ImageRecord>, ApiError> {
    store.list_images_by_slug(&normalize(slug)).await
}
