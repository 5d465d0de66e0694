//! Startup errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::routing::RouteError;

/// Anything that prevents the service from starting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("route table: {0}")]
    Routes(#[from] RouteError),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
