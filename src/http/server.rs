//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the dispatcher router from the route table
//! - Wire up middleware (request id, timeout, body limit)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::config::Config;
use crate::routing::{build_router, Handler, RouteTable};

/// HTTP server for the application.
pub struct HttpServer {
    router: Router,
    config: Config,
}

impl HttpServer {
    /// Create a new HTTP server from a validated configuration, the route
    /// table and the not-found handler.
    pub fn new(config: Config, routes: RouteTable, not_found: Handler) -> Self {
        let router = Self::build_router(&config, routes, not_found);
        Self { router, config }
    }

    /// Build the router with all middleware layers.
    ///
    /// The timeout sits outside the per-route access logger; a request it
    /// cuts short is logged by the logger as `cancelled`.
    #[allow(deprecated)]
    fn build_router(config: &Config, routes: RouteTable, not_found: Handler) -> Router {
        build_router(routes, &config.app.assets_dir, not_found)
            .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            assets_dir = %self.config.app.assets_dir.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
