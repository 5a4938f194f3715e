//! Same-origin API proxy for the DevConnect web client.
//!
//! Forwards every API call to the backend origin, carrying browser cookies
//! both ways, and relays the backend's answer with a few header fixes.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
