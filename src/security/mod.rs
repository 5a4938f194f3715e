//! Header and cookie rules applied at the proxy boundary.
//!
//! # Data Flow
//! ```text
//! inbound request headers
//!     → headers.rs (drop host / connection / content-length)
//!     → cookies.rs (fold cookies into one Cookie header)
//!     → outbound request
//!
//! backend response headers
//!     → headers.rs (drop content-encoding / transfer-encoding)
//!     → relayed response
//! ```

pub mod cookies;
pub mod headers;

pub use cookies::{parse_cookies, serialize_cookies, Cookie};
pub use headers::{forwarded_headers, should_forward_header, should_relay_response_header};
