//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, request id, timeout, body limit)
//!     → routing::Dispatcher (route table / static / not found)
//!     → middleware/logger.rs (access record per request)
//!     → handler or static_files.rs
//! ```

pub mod middleware;
pub mod server;
pub mod static_files;

pub use server::HttpServer;
