//! The catch-all API route.
//!
//! One handler serves GET, POST, PUT, PATCH and DELETE. It rebuilds the
//! backend URL from the wildcard segments, forwards the filtered headers,
//! cookies and body, and relays the backend's answer. Any failure becomes
//! the fixed 500 response; nothing is retried.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, Request, State},
    http::{header::COOKIE, request::Parts, HeaderValue, Method, Uri},
    response::Response,
};

use crate::http::error::ProxyError;
use crate::http::request::request_id;
use crate::http::response::{proxy_failure, relay_response};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::{forwarded_headers, parse_cookies, serialize_cookies};

/// Split the part of `path` after `prefix` into the wildcard segments.
///
/// Segments keep their percent-encoding so the rebuilt URL stays valid.
pub fn wildcard_segments<'a>(path: &'a str, prefix: &str) -> Vec<&'a str> {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    rest.split('/').collect()
}

/// `<base>/<segments joined by '/'>`.
pub fn target_url(base: &str, segments: &[&str]) -> String {
    format!("{}/{}", base, segments.join("/"))
}

/// GET and DELETE never carry a forwarded body.
pub fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Route handler. Never fails; proxy errors become the fixed 500 answer.
pub async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let request_id = request_id(request.headers()).to_string();
    // Absent when the router is driven in-process rather than through `run`.
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    tracing::debug!(
        request_id = %request_id,
        client = ?client,
        method = %method,
        path = %request.uri().path(),
        "Proxying request"
    );

    let outcome = match state.request_timeout {
        Some(limit) => tokio::time::timeout(limit, forward(&state, request))
            .await
            .unwrap_or(Err(ProxyError::RequestTimeout(limit))),
        None => forward(&state, request).await,
    };

    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, method = %method, error = %e, "Failed to proxy request");
            proxy_failure()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn forward(state: &AppState, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let uri = build_target(state, &parts)?;

    let body = if carries_body(&parts.method) {
        read_body(body, state.max_body_bytes).await
    } else {
        None
    };

    let mut headers = forwarded_headers(&parts.headers);
    if let Some(cookie) = serialize_cookies(&parse_cookies(&parts.headers)) {
        headers.insert(COOKIE, HeaderValue::from_bytes(cookie.as_bytes())?);
    }

    let mut outbound = axum::http::Request::new(body.map(Body::from).unwrap_or_else(Body::empty));
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = uri;
    *outbound.headers_mut() = headers;

    let upstream = state.client.send(outbound).await?;

    let (head, body) = upstream.into_parts();
    let body = axum::body::to_bytes(Body::new(body), usize::MAX)
        .await
        .map_err(ProxyError::UpstreamBody)?;

    tracing::debug!(status = %head.status, bytes = body.len(), "Upstream responded");
    Ok(relay_response(head, body))
}

fn build_target(state: &AppState, parts: &Parts) -> Result<Uri, ProxyError> {
    let segments = wildcard_segments(parts.uri.path(), &state.path_prefix);
    let mut target = target_url(&state.backend_base, &segments);

    if state.forward_query {
        if let Some(query) = parts.uri.query() {
            target.push('?');
            target.push_str(query);
        }
    }

    target
        .parse::<Uri>()
        .map_err(|source| ProxyError::InvalidTarget { target, source })
}

// An absent or unreadable body is not an error; the request goes out without one.
async fn read_body(body: Body, limit: usize) -> Option<Bytes> {
    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(error = %e, "Request body unreadable, forwarding without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url_joins_segments() {
        assert_eq!(target_url("http://localhost:8080", &["a", "b"]), "http://localhost:8080/a/b");
        assert_eq!(
            target_url("http://api.internal/v1", &["users", "42", "posts"]),
            "http://api.internal/v1/users/42/posts"
        );
    }

    #[test]
    fn test_wildcard_segments_at_root() {
        assert_eq!(wildcard_segments("/a/b", ""), ["a", "b"]);
        assert_eq!(wildcard_segments("/messages/conv%201", ""), ["messages", "conv%201"]);
    }

    #[test]
    fn test_wildcard_segments_under_prefix() {
        assert_eq!(wildcard_segments("/api/auth/login", "/api"), ["auth", "login"]);
        assert_eq!(wildcard_segments("/api/posts/", "/api"), ["posts", ""]);
    }

    #[test]
    fn test_only_post_put_patch_carry_bodies() {
        assert!(carries_body(&Method::POST));
        assert!(carries_body(&Method::PUT));
        assert!(carries_body(&Method::PATCH));
        assert!(!carries_body(&Method::GET));
        assert!(!carries_body(&Method::DELETE));
        assert!(!carries_body(&Method::HEAD));
    }
}
