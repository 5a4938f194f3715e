//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Root configuration for the API proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, mount prefix).
    pub listener: ListenerConfig,

    /// Backend origin every API call is forwarded to.
    pub backend: BackendConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Path the catch-all route is mounted under. Empty mounts it at the root;
    /// "/api" captures `/api/users/1` as the segments `["users", "1"]`.
    pub path_prefix: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            path_prefix: String::new(),
        }
    }
}

/// Backend origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend origin, without a trailing slash.
    pub base_url: String,

    /// Append the inbound query string to the target URL.
    pub forward_query: bool,

    /// Largest request body buffered for forwarding. Bodies over the limit
    /// are treated as unreadable and the request goes out without one.
    pub max_body_bytes: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            forward_query: false,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Timeout configuration. Both are off unless set.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout applied by the server middleware.
    pub request_secs: Option<u64>,

    /// Limit on waiting for the backend's response head.
    pub upstream_secs: Option<u64>,
}

impl TimeoutConfig {
    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }

    pub fn upstream(&self) -> Option<Duration> {
        self.upstream_secs.map(Duration::from_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
