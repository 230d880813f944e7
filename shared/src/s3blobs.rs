//! S3 implementation of the `Blobs` port.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use muse_atoms::error::ApiError;
use muse_atoms::ports::Blobs;

pub struct S3Blobs {
    client: S3Client,
    bucket: String,
    /// Base under which objects are publicly reachable (CDN or bucket URL).
    public_base_url: String,
}

impl S3Blobs {
    pub fn new(
        client: S3Client,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            bucket: bucket.into(),
            public_base_url,
        }
    }
}

#[async_trait]
impl Blobs for S3Blobs {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ApiError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("S3 put_object error: {e}")))?;

        tracing::info!(key, size, "uploaded object");
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    /// S3 deletes are idempotent: removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("S3 delete_object error: {e}")))?;

        tracing::info!(key, "deleted object");
        Ok(())
    }

    async fn signed_url(&self, key: &str, expires_in_secs: u64) -> Result<String, ApiError> {
        let config = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(|e| ApiError::Backend(format!("S3 presigning config error: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| ApiError::Backend(format!("S3 presign error: {e}")))?;

        Ok(presigned.uri().to_string())
    }
}
