//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the catch-all proxy route
//! - Wire up middleware (request ID, tracing)
//! - Serve connections until shutdown is signalled

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::error::ProxyError;
use crate::http::proxy::proxy_handler;
use crate::http::request::MakeRequestUuid;
use crate::http::upstream::UpstreamClient;

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub backend_base: Arc<str>,
    pub path_prefix: Arc<str>,
    pub forward_query: bool,
    pub max_body_bytes: usize,
    /// Bound on the whole forward; expiry is a proxy failure like any other.
    pub request_timeout: Option<Duration>,
    pub client: UpstreamClient,
}

impl AppState {
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        Ok(Self {
            backend_base: Arc::from(config.backend.base_url.as_str()),
            path_prefix: Arc::from(config.listener.path_prefix.as_str()),
            forward_query: config.backend.forward_query,
            max_body_bytes: config.backend.max_body_bytes,
            request_timeout: config.timeouts.request(),
            client: UpstreamClient::new(config.timeouts.upstream())?,
        })
    }
}

/// HTTP server for the API proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let state = AppState::from_config(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let pattern = format!("{}/{{*path}}", config.listener.path_prefix);
        let proxy = get(proxy_handler)
            .post(proxy_handler)
            .put(proxy_handler)
            .patch(proxy_handler)
            .delete(proxy_handler);

        Router::new()
            .route(&pattern, proxy)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires (or its sender is dropped),
    /// then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.backend.base_url,
            prefix = %self.config.listener.path_prefix,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
