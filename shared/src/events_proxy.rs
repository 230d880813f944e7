//! Read-through proxy for the third-party events listing.
//!
//! Stateless: every call goes straight to the upstream API with defaults
//! filled in for absent query parameters. Upstream failures map to a backend
//! error; there is no retry or caching here.

use lambda_http::{http::StatusCode, Body, Error as LambdaError, Response};

use muse_atoms::error::ApiError;
use muse_atoms::respond;

pub struct EventsProxy {
    http: reqwest::Client,
    base_url: String,
    default_location: String,
}

impl EventsProxy {
    pub fn new(base_url: impl Into<String>, default_location: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            default_location: default_location.into(),
        }
    }

    pub async fn list_events(
        &self,
        location: Option<&str>,
        page: Option<u32>,
    ) -> Result<serde_json::Value, ApiError> {
        if self.base_url.is_empty() {
            return Err(ApiError::Backend(
                "events upstream is not configured".to_string(),
            ));
        }

        let location = location.unwrap_or(&self.default_location);
        let page = page.unwrap_or(1).to_string();

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("location", location), ("page", page.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::Backend(format!("events upstream request error: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Backend(format!(
                "events upstream returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Backend(format!("events upstream body error: {e}")))
    }
}

/// HTTP Handler: GET /events
pub async fn list_events_handler(
    proxy: &EventsProxy,
    location: Option<&str>,
    page: Option<u32>,
) -> Result<Response<Body>, LambdaError> {
    match proxy.list_events(location, page).await {
        Ok(events) => respond::json(StatusCode::OK, &events),
        Err(e) => respond::error(&e),
    }
}
