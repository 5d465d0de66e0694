//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every dispatched request:
//!     → http::middleware::logger (one access record per request)
//!     → logging.rs (tracing subscriber, target "access")
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → stdout (human or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured logging via `tracing`; `RUST_LOG` overrides the config level
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
