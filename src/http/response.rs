//! Relay of backend responses to the browser.
//!
//! # Responsibilities
//! - Mirror the backend status code and reason phrase
//! - Copy headers, dropping encodings the buffered body no longer has
//! - Keep every `Set-Cookie` as its own header line
//! - Default a missing `content-type` to `application/json`
//! - Produce the fixed 500 answer for proxy failures

use axum::{
    body::{Body, Bytes},
    http::{
        header::{CONTENT_TYPE, SET_COOKIE},
        response::Parts,
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use hyper::ext::ReasonPhrase;
use serde_json::json;

use crate::security::headers::should_relay_response_header;

/// Body of every failed proxy attempt.
pub const PROXY_FAILURE_MESSAGE: &str = "Failed to proxy request";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Build the browser-facing response from the backend's head and full body.
pub fn relay_response(upstream: Parts, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = relayed_headers(&upstream.headers);

    // Only present when the backend used a non-canonical reason phrase.
    if let Some(reason) = upstream.extensions.get::<ReasonPhrase>() {
        response.extensions_mut().insert(reason.clone());
    }

    response
}

/// Filter and normalize backend headers for the browser.
pub fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 1);

    for (name, value) in upstream {
        if name == SET_COOKIE {
            // One line per cookie; never folded into a single value.
            headers.append(SET_COOKIE, value.clone());
        } else if should_relay_response_header(name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }

    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    }

    headers
}

/// The single failure answer: 500 with `{"error":"Failed to proxy request"}`.
pub fn proxy_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": PROXY_FAILURE_MESSAGE })),
    )
        .into_response()
}
