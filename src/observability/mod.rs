//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! proxy route produces:
//!     → logging.rs (structured log events, request id on every line)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
