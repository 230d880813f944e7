use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::Serialize;

use crate::error::ApiError;

/// JSON response with the given status.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(value)?.into())
        .map_err(Box::new)?)
}

/// JSON error body with the status mapped from the error kind.
pub fn error(err: &ApiError) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(err.status_code())
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"error": err.kind(), "message": err.to_string()})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}

/// 400 with a plain message, for bodies that fail to parse.
pub fn bad_request(message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"error": "validation", "message": message})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}

pub fn no_content() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Body::Empty)
        .map_err(Box::new)?)
}
