pub mod auth;
pub mod config;
pub mod dynamo;
pub mod events_proxy;
pub mod s3blobs;
pub mod state;

pub use config::AppConfig;
pub use dynamo::DynamoStore;
pub use s3blobs::S3Blobs;
pub use state::AppState;
