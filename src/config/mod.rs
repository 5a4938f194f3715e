//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → DEVCONNECT_API_URL override
//!     → CLI flag overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never changes afterwards
//! - All fields have defaults to allow running with no file at all
//! - The backend origin is injected into the proxy state, never read from
//!   the environment inside a handler

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, finalize, load_config, parse_config, read_config, ConfigError, BACKEND_URL_ENV};
pub use schema::{
    BackendConfig, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, TimeoutConfig,
    DEFAULT_BACKEND_URL,
};
pub use validation::{validate_config, ValidationError};
