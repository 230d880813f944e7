use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;

use crate::config::AppConfig;
use crate::dynamo::DynamoStore;
use crate::events_proxy::EventsProxy;
use crate::s3blobs::S3Blobs;

/// Shared per-process state: the configured backends, built once at cold
/// start and injected into every handler.
pub struct AppState {
    pub config: AppConfig,
    pub store: DynamoStore,
    pub blobs: S3Blobs,
    pub events: EventsProxy,
}

impl AppState {
    pub async fn init() -> Result<Self, String> {
        let config = AppConfig::from_env()?;
        let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        let store = DynamoStore::new(DynamoClient::new(&aws_config), config.table_name.clone());
        let blobs = S3Blobs::new(
            S3Client::new(&aws_config),
            config.media_bucket.clone(),
            config.public_media_base_url.clone(),
        );
        let events = EventsProxy::new(
            config.events_api_url.clone(),
            config.events_default_location.clone(),
        );

        tracing::info!(
            table = %config.table_name,
            bucket = %config.media_bucket,
            "app state initialized"
        );

        Ok(Self {
            config,
            store,
            blobs,
            events,
        })
    }
}
