use lambda_http::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the orchestrators and the Store/Blobs adapters.
///
/// `Backend` keeps the underlying cause as formatted text; adapters build it
/// with enough context ("DynamoDB put_item error: ...") to be useful in logs
/// without leaking SDK types into the core.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or invalid field: {0}")]
    Validation(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("could not decode image data at index {index}")]
    Decode { index: usize },

    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Decode { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable tag used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
            ApiError::Decode { .. } => "decode",
            ApiError::Backend(_) => "backend",
        }
    }
}
