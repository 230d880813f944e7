use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};

use super::model::{CreateTimelinePayload, UpdateTimelinePayload};
use super::service;
use crate::ports::Store;
use crate::respond;

/// HTTP Handler: POST /timeline
pub async fn create_entry_handler(
    store: &dyn Store,
    user: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: CreateTimelinePayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };
    match service::create_entry(store, payload, user).await {
        Ok(entry) => respond::json(StatusCode::CREATED, &entry),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: PUT /timeline/{id}
pub async fn update_entry_handler(
    store: &dyn Store,
    user: &str,
    id: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: UpdateTimelinePayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };
    match service::update_entry(store, id, payload, user).await {
        Ok(entry) => respond::json(StatusCode::OK, &entry),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: DELETE /timeline/{id}
pub async fn delete_entry_handler(
    store: &dyn Store,
    id: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::delete_entry(store, id).await {
        Ok(()) => respond::no_content(),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /timeline/{id}
pub async fn get_entry_handler(store: &dyn Store, id: &str) -> Result<Response<Body>, LambdaError> {
    match service::get_entry(store, id).await {
        Ok(entry) => respond::json(StatusCode::OK, &entry),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /timeline
pub async fn list_entries_handler(store: &dyn Store) -> Result<Response<Body>, LambdaError> {
    match service::list_entries(store).await {
        Ok(entries) => respond::json(StatusCode::OK, &entries),
        Err(e) => respond::error(&e),
    }
}
