use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};

use super::model::{CreateImagePayload, NewImage, UpdateImagePayload};
use super::service;
use crate::error::ApiError;
use crate::ports::{Blobs, Store};
use crate::respond;

/// HTTP Handler: POST /images
pub async fn create_image_handler(
    store: &dyn Store,
    blobs: &dyn Blobs,
    user: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: CreateImagePayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };

    let data = match BASE64.decode(&payload.data) {
        Ok(data) => data,
        Err(_) => return respond::error(&ApiError::Decode { index: 0 }),
    };
    let meta = NewImage {
        name: payload.name,
        slug: payload.slug,
        text: payload.text,
        date: payload.date,
        location: payload.location,
    };

    match service::upload(store, blobs, meta, data, user).await {
        Ok(image) => respond::json(StatusCode::CREATED, &image),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: PATCH /images/{id}
pub async fn update_image_handler(
    store: &dyn Store,
    blobs: &dyn Blobs,
    user: &str,
    id: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let mut payload: UpdateImagePayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };

    let data = match payload.data.take().filter(|d| !d.is_empty()) {
        Some(encoded) => match BASE64.decode(&encoded) {
            Ok(data) => Some(data),
            Err(_) => return respond::error(&ApiError::Decode { index: 0 }),
        },
        None => None,
    };

    match service::update(store, blobs, id, payload, data, user).await {
        Ok(image) => respond::json(StatusCode::OK, &image),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: DELETE /images/{id}
pub async fn delete_image_handler(
    store: &dyn Store,
    blobs: &dyn Blobs,
    id: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::delete(store, blobs, id).await {
        Ok(()) => respond::no_content(),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /images/{id}
pub async fn get_image_handler(store: &dyn Store, id: &str) -> Result<Response<Body>, LambdaError> {
    match service::get_image(store, id).await {
        Ok(image) => respond::json(StatusCode::OK, &image),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /images (optional ?slug= filter)
pub async fn list_images_handler(
    store: &dyn Store,
    slug: Option<&str>,
) -> Result<Response<Body>, LambdaError> {
    let result = match slug {
        Some(slug) => service::list_images_by_slug(store, slug).await,
        None => service::list_images(store).await,
    };
    match result {
        Ok(images) => respond::json(StatusCode::OK, &images),
        Err(e) => respond::error(&e),
    }
}
