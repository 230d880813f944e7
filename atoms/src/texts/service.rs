use chrono::Utc;

use super::model::{CreateTextPayload, TextPatch, TextRecord, UpdateTextPayload};
use crate::error::ApiError;
use crate::ports::Store;
use crate::slug::normalize;

/// Empty strings in a patch mean "no change", same as an absent field.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Create a text fragment with a normalized slug and fresh audit stamps.
pub async fn create_text(
    store: &dyn Store,
    payload: CreateTextPayload,
    updated_by: &str,
) -> Result<TextRecord, ApiError> {
    if payload.slug.trim().is_empty() {
        return Err(ApiError::Validation("slug"));
    }
    if payload.content.is_empty() {
        return Err(ApiError::Validation("content"));
    }

    let now = Utc::now().to_rfc3339();
    let record = TextRecord {
        id: String::new(),
        slug: normalize(&payload.slug),
        content: payload.content,
        page_id: non_empty(payload.page_id),
        page_slug: non_empty(payload.page_slug).map(|s| normalize(&s)),
        created_at: now.clone(),
        updated_at: now,
        last_updated_by: updated_by.to_string(),
    };

    store.create_text(record).await
}

/// Merge non-empty patch fields; `updated_at` is always refreshed.
pub async fn update_text(
    store: &dyn Store,
    id: &str,
    payload: UpdateTextPayload,
    updated_by: &str,
) -> Result<TextRecord, ApiError> {
    let patch = TextPatch {
        slug: non_empty(payload.slug).map(|s| normalize(&s)),
        content: non_empty(payload.content),
        page_id: non_empty(payload.page_id),
        page_slug: non_empty(payload.page_slug).map(|s| normalize(&s)),
        updated_at: Utc::now().to_rfc3339(),
        last_updated_by: updated_by.to_string(),
    };

    store.update_text(id, patch).await
}

pub async fn delete_text(store: &dyn Store, id: &str) -> Result<(), ApiError> {
    store.delete_text(id).await
}

pub async fn get_text(store: &dyn Store, id: &str) -> Result<TextRecord, ApiError> {
    store.get_text(id).await
}

pub async fn get_text_by_slug(store: &dyn Store, slug: &str) -> Result<TextRecord, ApiError> {
    store.get_text_by_slug(&normalize(slug)).await
}

pub async fn list_texts(store: &dyn Store) -> Result<Vec<TextRecord>, ApiError> {
    store.list_texts().await
}

pub async fn list_texts_by_page(
    store: &dyn Store,
    page_slug: &str,
) -> Result<Vec<TextRecord>, ApiError> {
    store.list_texts_by_page(&normalize(page_slug)).await
}
