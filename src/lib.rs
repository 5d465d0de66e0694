//! Route table, dispatcher and HTTP server for a disposable-message service.

pub mod actions;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod routing;

pub use config::Config;
pub use error::Error;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{build_router, Dispatcher, Route, RouteTable};
