use std::sync::Arc;

use lambda_http::http::header::{HeaderValue, VARY};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use muse_atoms::{gallery, images, texts, timeline};
use muse_shared::{auth, events_proxy, AppState};

fn with_cors_headers(mut resp: Response<Body>, cors_origin: &str) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_str(cors_origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,Authorization"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));
    resp
}

fn json_error(status: StatusCode, message: &str) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"error": message}).to_string().into(),
        )
        .map_err(Box::new)?)
}

/// Main Lambda handler - dispatches by method and path to the resource
/// handlers. Mutating methods must carry a valid bearer token.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let path = event.uri().path().to_string();
    tracing::info!(%method, %path, "request");

    // CORS preflight
    if method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, &state.config.cors_origin));
    }

    // Pass/fail gate: reads are public, writes need a verified token.
    let user = match method {
        Method::GET => String::new(),
        _ => match auth::authorized_user(&event, &state.config.auth_secret) {
            Some(user) => user,
            None => {
                let resp = json_error(StatusCode::UNAUTHORIZED, "missing or invalid token")?;
                return Ok(with_cors_headers(resp, &state.config.cors_origin));
            }
        },
    };

    let query = event.query_string_parameters();
    let body = event.body().to_vec();
    let store = &state.store;
    let blobs = &state.blobs;

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let resp = match (&method, segments.as_slice()) {
        // texts
        (&Method::POST, ["texts"]) => texts::http::create_text_handler(store, &user, &body).await,
        (&Method::GET, ["texts"]) => texts::http::list_texts_handler(store).await,
        (&Method::GET, ["texts", "slug", slug]) => {
            texts::http::get_text_by_slug_handler(store, slug).await
        }
        (&Method::GET, ["texts", id]) => texts::http::get_text_handler(store, id).await,
        (&Method::PUT, ["texts", id]) => {
            texts::http::update_text_handler(store, &user, id, &body).await
        }
        (&Method::DELETE, ["texts", id]) => texts::http::delete_text_handler(store, id).await,
        (&Method::GET, ["pages", page_slug, "texts"]) => {
            texts::http::list_texts_by_page_handler(store, page_slug).await
        }

        // images
        (&Method::POST, ["images"]) => {
            images::http::create_image_handler(store, blobs, &user, &body).await
        }
        (&Method::GET, ["images"]) => {
            images::http::list_images_handler(store, query.first("slug")).await
        }
        (&Method::GET, ["images", id]) => images::http::get_image_handler(store, id).await,
        (&Method::PATCH, ["images", id]) => {
            images::http::update_image_handler(store, blobs, &user, id, &body).await
        }
        (&Method::DELETE, ["images", id]) => {
            images::http::delete_image_handler(store, blobs, id).await
        }

        // timeline
        (&Method::POST, ["timeline"]) => {
            timeline::http::create_entry_handler(store, &user, &body).await
        }
        (&Method::GET, ["timeline"]) => timeline::http::list_entries_handler(store).await,
        (&Method::GET, ["timeline", id]) => timeline::http::get_entry_handler(store, id).await,
        (&Method::PUT, ["timeline", id]) => {
            timeline::http::update_entry_handler(store, &user, id, &body).await
        }
        (&Method::DELETE, ["timeline", id]) => {
            timeline::http::delete_entry_handler(store, id).await
        }

        // gallery events
        (&Method::POST, ["gallery-events"]) => {
            gallery::http::create_gallery_event_handler(store, blobs, &user, &body).await
        }
        (&Method::GET, ["gallery-events"]) => {
            gallery::http::list_gallery_events_handler(store).await
        }
        (&Method::GET, ["gallery-events", id]) => {
            gallery::http::get_gallery_event_handler(store, id).await
        }
        (&Method::DELETE, ["gallery-events", id]) => {
            gallery::http::delete_gallery_event_handler(store, id).await
        }

        // third-party events proxy
        (&Method::GET, ["events"]) => {
            let page = query.first("page").and_then(|p| p.parse().ok());
            events_proxy::list_events_handler(&state.events, query.first("location"), page).await
        }

        _ => json_error(StatusCode::NOT_FOUND, "no such route"),
    };

    Ok(with_cors_headers(resp?, &state.config.cors_origin))
}
