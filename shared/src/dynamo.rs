//! DynamoDB implementation of the `Store` port.
//!
//! Single-table design: every record lives under a family partition key
//! (`TEXT`, `IMAGE`, `EVENT`, `TIMELINE`) with `{FAMILY}#{id}` as the sort
//! key, so a family listing is one query. Domain dates and audit stamps are
//! stored as RFC 3339 strings.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use muse_atoms::error::ApiError;
use muse_atoms::gallery::model::GalleryEventRecord;
use muse_atoms::images::model::{ImagePatch, ImageRecord};
use muse_atoms::ports::Store;
use muse_atoms::texts::model::{TextPatch, TextRecord};
use muse_atoms::timeline::model::{TimelineEntry, TimelinePatch};

pub struct DynamoStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    async fn query_family(
        &self,
        family: &str,
    ) -> Result<Vec<HashMap<String, AttributeValue>>, ApiError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(family.to_string()))
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB query error: {e}")))?;
        Ok(result.items().to_vec())
    }

    async fn get_item(
        &self,
        family: &'static str,
        id: &str,
        kind: &'static str,
    ) -> Result<HashMap<String, AttributeValue>, ApiError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(family.to_string()))
            .key("SK", AttributeValue::S(format!("{family}#{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB get_item error: {e}")))?;

        result.item().cloned().ok_or(ApiError::NotFound(kind))
    }

    async fn delete_item(
        &self,
        family: &'static str,
        id: &str,
        kind: &'static str,
    ) -> Result<(), ApiError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(family.to_string()))
            .key("SK", AttributeValue::S(format!("{family}#{id}")))
            .return_values(aws_sdk_dynamodb::types::ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB delete_item error: {e}")))?;

        if result.attributes().is_none() {
            return Err(ApiError::NotFound(kind));
        }
        Ok(())
    }

    /// Apply a dynamic SET merge and return the updated attributes.
    async fn apply_patch(
        &self,
        family: &'static str,
        id: &str,
        kind: &'static str,
        sets: Vec<(&'static str, AttributeValue)>,
    ) -> Result<HashMap<String, AttributeValue>, ApiError> {
        let mut exprs = Vec::with_capacity(sets.len());
        let mut builder = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(family.to_string()))
            .key("SK", AttributeValue::S(format!("{family}#{id}")))
            .condition_expression("attribute_exists(SK)")
            .return_values(aws_sdk_dynamodb::types::ReturnValue::AllNew);

        for (i, (name, value)) in sets.into_iter().enumerate() {
            exprs.push(format!("#n{i} = :v{i}"));
            builder = builder
                .expression_attribute_names(format!("#n{i}"), name)
                .expression_attribute_values(format!(":v{i}"), value);
        }
        builder = builder.update_expression(format!("SET {}", exprs.join(", ")));

        let result = builder.send().await.map_err(|e| {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                ApiError::NotFound(kind)
            } else {
                ApiError::Backend(format!("DynamoDB update_item error: {service_err}"))
            }
        })?;

        result
            .attributes()
            .cloned()
            .ok_or_else(|| ApiError::Backend("DynamoDB update_item returned no attributes".into()))
    }
}

fn attr_s(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn attr_opt_s(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn attr_date(item: &HashMap<String, AttributeValue>, name: &str) -> Option<DateTime<Utc>> {
    attr_opt_s(item, name)
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|d| d.with_timezone(&Utc))
}

fn attr_list_s(item: &HashMap<String, AttributeValue>, name: &str) -> Vec<String> {
    item.get(name)
        .and_then(|v| v.as_l().ok())
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_s().ok())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn id_from_sk(item: &HashMap<String, AttributeValue>, prefix: &str) -> String {
    attr_s(item, "SK")
        .strip_prefix(prefix)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn text_from_item(item: &HashMap<String, AttributeValue>) -> TextRecord {
    TextRecord {
        id: id_from_sk(item, "TEXT#"),
        slug: attr_s(item, "slug"),
        content: attr_s(item, "content"),
        page_id: attr_opt_s(item, "page_id"),
        page_slug: attr_opt_s(item, "page_slug"),
        created_at: attr_s(item, "created_at"),
        updated_at: attr_s(item, "updated_at"),
        last_updated_by: attr_s(item, "last_updated_by"),
    }
}

fn image_from_item(item: &HashMap<String, AttributeValue>) -> ImageRecord {
    ImageRecord {
        id: id_from_sk(item, "IMAGE#"),
        slug: attr_opt_s(item, "slug"),
        object_url: attr_s(item, "object_url"),
        name: attr_s(item, "name"),
        text: attr_s(item, "text"),
        date: attr_date(item, "date"),
        location: attr_opt_s(item, "location"),
        created_at: attr_s(item, "created_at"),
        updated_at: attr_s(item, "updated_at"),
        last_updated_by: attr_s(item, "last_updated_by"),
    }
}

fn event_from_item(item: &HashMap<String, AttributeValue>) -> GalleryEventRecord {
    GalleryEventRecord {
        id: id_from_sk(item, "EVENT#"),
        name: attr_s(item, "name"),
        location: attr_s(item, "location"),
        date: attr_date(item, "date").unwrap_or_default(),
        image_urls: attr_list_s(item, "image_urls"),
        image_ids: attr_list_s(item, "image_ids"),
        created_at: attr_s(item, "created_at"),
        updated_at: attr_s(item, "updated_at"),
        last_updated_by: attr_s(item, "last_updated_by"),
    }
}

fn timeline_from_item(item: &HashMap<String, AttributeValue>) -> TimelineEntry {
    TimelineEntry {
        id: id_from_sk(item, "TIMELINE#"),
        name: attr_s(item, "name"),
        text: attr_s(item, "text"),
        location: attr_s(item, "location"),
        date: attr_date(item, "date").unwrap_or_default(),
        created_at: attr_s(item, "created_at"),
        updated_at: attr_s(item, "updated_at"),
        last_updated_by: attr_s(item, "last_updated_by"),
    }
}

#[async_trait]
impl Store for DynamoStore {
    async fn create_text(&self, mut record: TextRecord) -> Result<TextRecord, ApiError> {
        record.id = Uuid::new_v4().to_string();

        let mut builder = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S("TEXT".to_string()))
            .item("SK", AttributeValue::S(format!("TEXT#{}", record.id)))
            .item("slug", AttributeValue::S(record.slug.clone()))
            .item("content", AttributeValue::S(record.content.clone()))
            .item("created_at", AttributeValue::S(record.created_at.clone()))
            .item("updated_at", AttributeValue::S(record.updated_at.clone()))
            .item(
                "last_updated_by",
                AttributeValue::S(record.last_updated_by.clone()),
            );

        if let Some(page_id) = &record.page_id {
            builder = builder.item("page_id", AttributeValue::S(page_id.clone()));
        }
        if let Some(page_slug) = &record.page_slug {
            builder = builder.item("page_slug", AttributeValue::S(page_slug.clone()));
        }

        builder
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB put_item error: {e}")))?;

        Ok(record)
    }

    async fn update_text(&self, id: &str, patch: TextPatch) -> Result<TextRecord, ApiError> {
        let mut sets = vec![
            ("updated_at", AttributeValue::S(patch.updated_at)),
            ("last_updated_by", AttributeValue::S(patch.last_updated_by)),
        ];
        if let Some(slug) = patch.slug {
            sets.push(("slug", AttributeValue::S(slug)));
        }
        if let Some(content) = patch.content {
            sets.push(("content", AttributeValue::S(content)));
        }
        if let Some(page_id) = patch.page_id {
            sets.push(("page_id", AttributeValue::S(page_id)));
        }
        if let Some(page_slug) = patch.page_slug {
            sets.push(("page_slug", AttributeValue::S(page_slug)));
        }

        let item = self.apply_patch("TEXT", id, "text", sets).await?;
        Ok(text_from_item(&item))
    }

    async fn delete_text(&self, id: &str) -> Result<(), ApiError> {
        self.delete_item("TEXT", id, "text").await
    }

    async fn get_text(&self, id: &str) -> Result<TextRecord, ApiError> {
        let item = self.get_item("TEXT", id, "text").await?;
        Ok(text_from_item(&item))
    }

    async fn get_text_by_slug(&self, slug: &str) -> Result<TextRecord, ApiError> {
        let items = self.query_family("TEXT").await?;
        items
            .iter()
            .find(|item| attr_s(item, "slug") == slug)
            .map(text_from_item)
            .ok_or(ApiError::NotFound("text"))
    }

    async fn list_texts(&self) -> Result<Vec<TextRecord>, ApiError> {
        let items = self.query_family("TEXT").await?;
        Ok(items.iter().map(text_from_item).collect())
    }

    async fn list_texts_by_page(&self, page_slug: &str) -> Result<Vec<TextRecord>, ApiError> {
        let items = self.query_family("TEXT").await?;
        Ok(items
            .iter()
            .filter(|item| attr_opt_s(item, "page_slug").as_deref() == Some(page_slug))
            .map(text_from_item)
            .collect())
    }

    async fn create_image(&self, mut record: ImageRecord) -> Result<ImageRecord, ApiError> {
        record.id = Uuid::new_v4().to_string();

        let mut builder = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S("IMAGE".to_string()))
            .item("SK", AttributeValue::S(format!("IMAGE#{}", record.id)))
            .item("object_url", AttributeValue::S(record.object_url.clone()))
            .item("name", AttributeValue::S(record.name.clone()))
            .item("text", AttributeValue::S(record.text.clone()))
            .item("created_at", AttributeValue::S(record.created_at.clone()))
            .item("updated_at", AttributeValue::S(record.updated_at.clone()))
            .item(
                "last_updated_by",
                AttributeValue::S(record.last_updated_by.clone()),
            );

        if let Some(slug) = &record.slug {
            builder = builder.item("slug", AttributeValue::S(slug.clone()));
        }
        if let Some(date) = &record.date {
            builder = builder.item("date", AttributeValue::S(date.to_rfc3339()));
        }
        if let Some(location) = &record.location {
            builder = builder.item("location", AttributeValue::S(location.clone()));
        }

        builder
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB put_item error: {e}")))?;

        Ok(record)
    }

    async fn update_image(&self, id: &str, patch: ImagePatch) -> Result<ImageRecord, ApiError> {
        let mut sets = vec![
            ("updated_at", AttributeValue::S(patch.updated_at)),
            ("last_updated_by", AttributeValue::S(patch.last_updated_by)),
        ];
        if let Some(name) = patch.name {
            sets.push(("name", AttributeValue::S(name)));
        }
        if let Some(slug) = patch.slug {
            sets.push(("slug", AttributeValue::S(slug)));
        }
        if let Some(text) = patch.text {
            sets.push(("text", AttributeValue::S(text)));
        }
        if let Some(date) = patch.date {
            sets.push(("date", AttributeValue::S(date.to_rfc3339())));
        }
        if let Some(location) = patch.location {
            sets.push(("location", AttributeValue::S(location)));
        }
        if let Some(object_url) = patch.object_url {
            sets.push(("object_url", AttributeValue::S(object_url)));
        }

        let item = self.apply_patch("IMAGE", id, "image", sets).await?;
        Ok(image_from_item(&item))
    }

    async fn delete_image(&self, id: &str) -> Result<(), ApiError> {
        self.delete_item("IMAGE", id, "image").await
    }

    async fn get_image(&self, id: &str) -> Result<ImageRecord, ApiError> {
        let item = self.get_item("IMAGE", id, "image").await?;
        Ok(image_from_item(&item))
    }

    async fn list_images(&self) -> Result<Vec<ImageRecord>, ApiError> {
        let items = self.query_family("IMAGE").await?;
        Ok(items.iter().map(image_from_item).collect())
    }

    async fn list_images_by_slug(&self, slug: &str) -> Result<Vec<ImageRecord>, ApiError> {
        let items = self.query_family("IMAGE").await?;
        Ok(items
            .iter()
            .filter(|item| attr_opt_s(item, "slug").as_deref() == Some(slug))
            .map(image_from_item)
            .collect())
    }

    async fn create_gallery_event(
        &self,
        mut record: GalleryEventRecord,
    ) -> Result<GalleryEventRecord, ApiError> {
        record.id = Uuid::new_v4().to_string();

        let urls = record
            .image_urls
            .iter()
            .map(|u| AttributeValue::S(u.clone()))
            .collect();
        let ids = record
            .image_ids
            .iter()
            .map(|i| AttributeValue::S(i.clone()))
            .collect();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S("EVENT".to_string()))
            .item("SK", AttributeValue::S(format!("EVENT#{}", record.id)))
            .item("name", AttributeValue::S(record.name.clone()))
            .item("location", AttributeValue::S(record.location.clone()))
            .item("date", AttributeValue::S(record.date.to_rfc3339()))
            .item("image_urls", AttributeValue::L(urls))
            .item("image_ids", AttributeValue::L(ids))
            .item("created_at", AttributeValue::S(record.created_at.clone()))
            .item("updated_at", AttributeValue::S(record.updated_at.clone()))
            .item(
                "last_updated_by",
                AttributeValue::S(record.last_updated_by.clone()),
            )
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB put_item error: {e}")))?;

        Ok(record)
    }

    async fn get_gallery_event(&self, id: &str) -> Result<GalleryEventRecord, ApiError> {
        let item = self.get_item("EVENT", id, "gallery event").await?;
        Ok(event_from_item(&item))
    }

    async fn list_gallery_events(&self) -> Result<Vec<GalleryEventRecord>, ApiError> {
        let items = self.query_family("EVENT").await?;
        let mut events: Vec<_> = items.iter().map(event_from_item).collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }

    async fn delete_gallery_event(&self, id: &str) -> Result<(), ApiError> {
        self.delete_item("EVENT", id, "gallery event").await
    }

    async fn create_timeline_entry(
        &self,
        mut record: TimelineEntry,
    ) -> Result<TimelineEntry, ApiError> {
        record.id = Uuid::new_v4().to_string();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S("TIMELINE".to_string()))
            .item("SK", AttributeValue::S(format!("TIMELINE#{}", record.id)))
            .item("name", AttributeValue::S(record.name.clone()))
            .item("text", AttributeValue::S(record.text.clone()))
            .item("location", AttributeValue::S(record.location.clone()))
            .item("date", AttributeValue::S(record.date.to_rfc3339()))
            .item("created_at", AttributeValue::S(record.created_at.clone()))
            .item("updated_at", AttributeValue::S(record.updated_at.clone()))
            .item(
                "last_updated_by",
                AttributeValue::S(record.last_updated_by.clone()),
            )
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("DynamoDB put_item error: {e}")))?;

        Ok(record)
    }

    async fn update_timeline_entry(
        &self,
        id: &str,
        patch: TimelinePatch,
    ) -> Result<TimelineEntry, ApiError> {
        let mut sets = vec![
            ("updated_at", AttributeValue::S(patch.updated_at)),
            ("last_updated_by", AttributeValue::S(patch.last_updated_by)),
        ];
        if let Some(name) = patch.name {
            sets.push(("name", AttributeValue::S(name)));
        }
        if let Some(text) = patch.text {
            sets.push(("text", AttributeValue::S(text)));
        }
        if let Some(location) = patch.location {
            sets.push(("location", AttributeValue::S(location)));
        }
        if let Some(date) = patch.date {
            sets.push(("date", AttributeValue::S(date.to_rfc3339())));
        }

        let item = self.apply_patch("TIMELINE", id, "timeline entry", sets).await?;
        Ok(timeline_from_item(&item))
    }

    async fn delete_timeline_entry(&self, id: &str) -> Result<(), ApiError> {
        self.delete_item("TIMELINE", id, "timeline entry").await
    }

    async fn get_timeline_entry(&self, id: &str) -> Result<TimelineEntry, ApiError> {
        let item = self.get_item("TIMELINE", id, "timeline entry").await?;
        Ok(timeline_from_item(&item))
    }

    async fn list_timeline_entries(&self) -> Result<Vec<TimelineEntry>, ApiError> {
        let items = self.query_family("TIMELINE").await?;
        let mut entries: Vec<_> = items.iter().map(timeline_from_item).collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }
}
