//! Header filtering rules for both directions of the proxy.
//!
//! # Responsibilities
//! - Decide which inbound headers reach the backend
//! - Decide which backend headers reach the browser
//!
//! # Design Decisions
//! - Names are compared lower-cased, so `Host`, `HOST` and `host` are equal
//! - `Set-Cookie` is not covered here; the relay appends each cookie itself

use axum::http::HeaderMap;

/// Transport-level request headers the outbound connection recomputes.
pub const EXCLUDED_REQUEST_HEADERS: [&str; 3] = ["host", "connection", "content-length"];

/// Response headers describing an encoding the relayed body no longer has.
pub const EXCLUDED_RESPONSE_HEADERS: [&str; 2] = ["content-encoding", "transfer-encoding"];

/// Whether an inbound header is copied onto the outbound request.
pub fn should_forward_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    !EXCLUDED_REQUEST_HEADERS.contains(&lower.as_str())
}

/// Whether a backend header is copied onto the relayed response.
pub fn should_relay_response_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    !EXCLUDED_RESPONSE_HEADERS.contains(&lower.as_str())
}

/// Copy every forwardable header, keeping repeated values.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if should_forward_header(name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_excluded_request_headers_any_case() {
        for name in ["host", "Host", "HOST", "connection", "Connection", "content-length", "Content-Length"] {
            assert!(!should_forward_header(name), "{name} should be dropped");
        }
        for name in ["cookie", "Authorization", "content-type", "x-request-id", "hostname"] {
            assert!(should_forward_header(name), "{name} should be forwarded");
        }
    }

    #[test]
    fn test_excluded_response_headers_any_case() {
        assert!(!should_relay_response_header("Content-Encoding"));
        assert!(!should_relay_response_header("TRANSFER-ENCODING"));
        assert!(should_relay_response_header("content-type"));
        assert!(should_relay_response_header("content-length"));
        assert!(should_relay_response_header("set-cookie"));
    }

    #[test]
    fn test_forwarded_headers_filters_and_keeps_repeats() {
        let mut inbound = HeaderMap::new();
        inbound.insert("host", HeaderValue::from_static("devconnect.local"));
        inbound.insert("connection", HeaderValue::from_static("keep-alive"));
        inbound.insert("content-length", HeaderValue::from_static("12"));
        inbound.insert("authorization", HeaderValue::from_static("Bearer t0k3n"));
        inbound.append("accept", HeaderValue::from_static("application/json"));
        inbound.append("accept", HeaderValue::from_static("text/plain"));

        let headers = forwarded_headers(&inbound);

        assert!(!headers.contains_key("host"));
        assert!(!headers.contains_key("connection"));
        assert!(!headers.contains_key("content-length"));
        assert_eq!(headers["authorization"], "Bearer t0k3n");
        let accept: Vec<_> = headers.get_all("accept").iter().collect();
        assert_eq!(accept, ["application/json", "text/plain"]);
    }
}
