use chrono::Utc;

use super::model::{CreateTimelinePayload, TimelineEntry, TimelinePatch, UpdateTimelinePayload};
use crate::error::ApiError;
use crate::ports::Store;
use crate::texts::service::non_empty;

pub async fn create_entry(
    store: &dyn Store,
    payload: CreateTimelinePayload,
    updated_by: &str,
) -> Result<TimelineEntry, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name"));
    }
    if payload.date.timestamp() == 0 {
        return Err(ApiError::Validation("date"));
    }

    let now = Utc::now().to_rfc3339();
    let entry = TimelineEntry {
        id: String::new(),
        name: payload.name,
        text: payload.text,
        location: payload.location,
        date: payload.date,
        created_at: now.clone(),
        updated_at: now,
        last_updated_by: updated_by.to_string(),
    };

    store.create_timeline_entry(entry).await
}

pub async fn update_entry(
    store: &dyn Store,
    id: &str,
    payload: UpdateTimelinePayload,
    updated_by: &str,
) -> Result<TimelineEntry, ApiError> {
    let patch = TimelinePatch {
        name: non_empty(payload.name),
        text: non_empty(payload.text),
        location: non_empty(payload.location),
        date: payload.date,
        updated_at: Utc::now().to_rfc3339(),
        last_updated_by: updated_by.to_string(),
    };

    store.update_timeline_entry(id, patch).await
}

pub async fn delete_entry(store: &dyn Store, id: &str) -> Result<(), ApiError> {
    store.delete_timeline_entry(id).await
}

pub async fn get_entry(store: &dyn Store, id: &str) -> Result<TimelineEntry, ApiError> {
    store.get_timeline_entry(id).await
}

pub async fn list_entries(store: &dyn Store) -> Result<Vec<TimelineEntry>, ApiError> {
    store.list_timeline_entries().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use chrono::TimeZone;

    fn payload() -> CreateTimelinePayload {
        CreateTimelinePayload {
            name: "Moved to SP".to_string(),
            text: "New city".to_string(),
            location: "São Paulo".to_string(),
            date: Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_and_update_merge_semantics() {
        let store = MemoryStore::default();
        let entry = create_entry(&store, payload(), "admin").await.unwrap();
        assert_eq!(entry.created_at, entry.updated_at);

        let updated = update_entry(
            &store,
            &entry.id,
            UpdateTimelinePayload {
                text: Some("Big move".to_string()),
                location: Some(String::new()),
                ..Default::default()
            },
            "editor",
        )
        .await
        .unwrap();

        assert_eq!(updated.text, "Big move");
        assert_eq!(updated.location, "São Paulo");
        assert_eq!(updated.name, "Moved to SP");
        assert_eq!(updated.last_updated_by, "editor");
    }

    #[tokio::test]
    async fn create_rejects_zero_date() {
        let store = MemoryStore::default();
        let mut p = payload();
        p.date = Utc.timestamp_opt(0, 0).unwrap();
        let err = create_entry(&store, p, "admin").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation("date")));
    }

    #[tokio::test]
    async fn update_of_missing_entry_is_not_found() {
        let store = MemoryStore::default();
        let err = update_entry(&store, "nope", UpdateTimelinePayload::default(), "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
