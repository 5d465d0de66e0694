//! Request middleware.

pub mod logger;

pub use logger::{Logger, LoggerLayer, ACCESS_LOG_TARGET, NOT_FOUND_ROUTE, STATIC_ROUTE};
