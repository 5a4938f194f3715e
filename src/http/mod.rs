//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → proxy.rs (target URL, header + cookie forwarding, body)
//!     → upstream.rs (one call to the backend origin)
//!     → response.rs (status, filtered headers, Set-Cookie, content type)
//!     → Send to client
//! ```

pub mod error;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use error::ProxyError;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
pub use upstream::UpstreamClient;
