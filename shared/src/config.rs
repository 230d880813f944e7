use std::env;

/// Process configuration, read once at startup from the Lambda environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub table_name: String,
    pub media_bucket: String,
    pub region: String,
    /// Base URL under which uploaded objects are publicly reachable
    /// (CDN or bucket website). Falls back to the virtual-hosted S3 URL.
    pub public_media_base_url: String,
    pub auth_secret: String,
    pub events_api_url: String,
    pub events_default_location: String,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let table_name = env::var("TABLE_NAME").unwrap_or_else(|_| "muse".to_string());
        let media_bucket =
            env::var("MEDIA_BUCKET").map_err(|_| "MEDIA_BUCKET must be set".to_string())?;
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let public_media_base_url = env::var("PUBLIC_MEDIA_BASE_URL")
            .unwrap_or_else(|_| format!("https://{media_bucket}.s3.{region}.amazonaws.com"));
        let auth_secret =
            env::var("AUTH_SECRET").map_err(|_| "AUTH_SECRET must be set".to_string())?;
        let events_api_url = env::var("EVENTS_API_URL").unwrap_or_default();
        let events_default_location =
            env::var("EVENTS_DEFAULT_LOCATION").unwrap_or_else(|_| "sao-paulo".to_string());
        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        Ok(Self {
            table_name,
            media_bucket,
            region,
            public_media_base_url,
            auth_secret,
            events_api_url,
            events_default_location,
            cors_origin,
        })
    }
}
