//! Proxy failure taxonomy.
//!
//! Every request-time variant ends in the same client-facing answer; the
//! distinction only matters for logs.

use std::time::Duration;

use axum::http::header::InvalidHeaderValue;
use axum::http::uri::InvalidUri;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// TLS setup for the upstream connector failed at startup.
    #[error("failed to configure upstream TLS: {0}")]
    Tls(#[source] rustls::Error),

    /// Joined path did not form a valid URI.
    #[error("invalid target URL `{target}`: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: InvalidUri,
    },

    /// Re-serialized cookies could not form a header value.
    #[error("invalid cookie header: {0}")]
    InvalidCookie(#[from] InvalidHeaderValue),

    /// Connection refused, reset, DNS failure, TLS handshake and the like.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] hyper_util::client::legacy::Error),

    #[error("upstream did not respond within {0:?}")]
    UpstreamTimeout(Duration),

    /// The whole forward, body reads included, ran past `timeouts.request_secs`.
    #[error("request not completed within {0:?}")]
    RequestTimeout(Duration),

    #[error("failed to read upstream body: {0}")]
    UpstreamBody(#[source] axum::Error),
}
