use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};

use super::model::{CreateTextPayload, UpdateTextPayload};
use super::service;
use crate::ports::Store;
use crate::respond;

/// HTTP Handler: POST /texts
pub async fn create_text_handler(
    store: &dyn Store,
    user: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: CreateTextPayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };
    match service::create_text(store, payload, user).await {
        Ok(text) => respond::json(StatusCode::CREATED, &text),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: PUT /texts/{id}
pub async fn update_text_handler(
    store: &dyn Store,
    user: &str,
    id: &str,
    body: &[u8],
) -> Result<Response<Body>, LambdaError> {
    let payload: UpdateTextPayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => return respond::bad_request(&format!("invalid request body: {e}")),
    };
    match service::update_text(store, id, payload, user).await {
        Ok(text) => respond::json(StatusCode::OK, &text),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: DELETE /texts/{id}
pub async fn delete_text_handler(
    store: &dyn Store,
    id: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::delete_text(store, id).await {
        Ok(()) => respond::no_content(),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /texts/{id}
pub async fn get_text_handler(store: &dyn Store, id: &str) -> Result<Response<Body>, LambdaError> {
    match service::get_text(store, id).await {
        Ok(text) => respond::json(StatusCode::OK, &text),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /texts/slug/{slug}
pub async fn get_text_by_slug_handler(
    store: &dyn Store,
    slug: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::get_text_by_slug(store, slug).await {
        Ok(text) => respond::json(StatusCode::OK, &text),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /texts
pub async fn list_texts_handler(store: &dyn Store) -> Result<Response<Body>, LambdaError> {
    match service::list_texts(store).await {
        Ok(texts) => respond::json(StatusCode::OK, &texts),
        Err(e) => respond::error(&e),
    }
}

/// HTTP Handler: GET /pages/{page_slug}/texts
pub async fn list_texts_by_page_handler(
    store: &dyn Store,
    page_slug: &str,
) -> Result<Response<Body>, LambdaError> {
    match service::list_texts_by_page(store, page_slug).await {
        Ok(texts) => respond::json(StatusCode::OK, &texts),
        Err(e) => respond::error(&e),
    }
}
