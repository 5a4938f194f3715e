//! Outbound transport to the backend origin.
//!
//! A pooled `hyper_util` client over a rustls connector that speaks both
//! `http` and `https`, wrapped in response decompression so the proxy always
//! sees decoded bytes no matter what the backend negotiated.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower::{ServiceBuilder, ServiceExt};
use tower_http::decompression::{Decompression, DecompressionBody, DecompressionLayer};

use crate::http::error::ProxyError;

/// Backend response with its body still streaming, already decoded.
pub type UpstreamResponse = Response<DecompressionBody<Incoming>>;

type Connector = HttpsConnector<HttpConnector>;

/// Cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    inner: Decompression<Client<Connector, Body>>,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    /// Build a client. `timeout` bounds the wait for the response head;
    /// `None` waits as long as the connection stays open.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ProxyError> {
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())
            .map_err(ProxyError::Tls)?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);
        let inner = ServiceBuilder::new()
            .layer(DecompressionLayer::new())
            .service(client);

        Ok(Self { inner, timeout })
    }

    /// Send exactly one request. No retries.
    pub async fn send(&self, request: Request<Body>) -> Result<UpstreamResponse, ProxyError> {
        let call = self.inner.clone().oneshot(request);

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| ProxyError::UpstreamTimeout(limit))?,
            None => call.await,
        };

        result.map_err(ProxyError::Upstream)
    }
}
