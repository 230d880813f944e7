use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};

use super::model::CreateGalleryEventPayload;
use super::service;
use crate::ports::{Blobs, Store};
use crate::respond;

/// HTTP Handler: POST /gallery-events
pub async fn create_gallery_event_handler(
    store: &dyn Store,
    blobs: &dyn Blobs,
    user: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: CreateGalleryEventPayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };
    match service::create_gallery_event(store, blobs, payload, user).await {
        Ok(event) => respond::json(StatusCode::CREATED, &event),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /gallery-events/{id}
pub async fn get_gallery_event_handler(
    store: &dyn Store,
    id: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::get_gallery_event(store, id).await {
        Ok(event) => respond::json(StatusCode::OK, &event),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /gallery-events
pub async fn list_gallery_events_handler(
    store: &dyn Store,
) -> Result<Response<Body>, LambdaError> {
    match service::list_gallery_events(store).await {
        Ok(events) => respond::json(StatusCode::OK, &events),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: DELETE /gallery-events/{id}
pub async fn delete_gallery_event_handler(
    store: &dyn Store,
    id: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::delete_gallery_event(store, id).await {
        Ok(()) => respond::no_content(),
        Err(e) => respond::error(&e),
    }
}
