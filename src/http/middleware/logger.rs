//! Access logging decorator.
//!
//! Wraps a handler under a route name and emits exactly one access record
//! per request once the inner service has produced its response. The
//! request and response pass through unchanged.
//!
//! A request whose future is dropped before completion (the server timeout
//! fired, or the client went away) is still recorded, with the status
//! `cancelled`.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::response::Response;
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::observability::metrics;

/// Tracing target of access records.
pub const ACCESS_LOG_TARGET: &str = "access";

/// Route name used for the not-found fallback.
pub const NOT_FOUND_ROUTE: &str = "404";

/// Route name used for static asset requests.
pub const STATIC_ROUTE: &str = "static";

/// Layer that tags a service with a route name for access logging.
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    name: Arc<str>,
}

impl LoggerLayer {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }
}

impl<S> Layer<S> for LoggerLayer {
    type Service = Logger<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logger {
            name: self.name.clone(),
            inner,
        }
    }
}

/// Service produced by [`LoggerLayer`].
#[derive(Debug, Clone)]
pub struct Logger<S> {
    name: Arc<str>,
    inner: S,
}

impl<S> Logger<S> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S> Service<Request<Body>> for Logger<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible>,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut pending = PendingAccess {
            route: self.name.clone(),
            method: req.method().clone(),
            uri: req.uri().clone(),
            request_id: request_id(&req),
            start: Instant::now(),
            recorded: false,
        };

        let future = self.inner.call(req);
        Box::pin(async move {
            let response = future.await?;
            pending.complete(response.status());
            Ok(response)
        })
    }
}

/// Access record for a request in flight. Emits on completion, or on drop
/// if the request never completed.
struct PendingAccess {
    route: Arc<str>,
    method: Method,
    uri: Uri,
    request_id: Option<String>,
    start: Instant,
    recorded: bool,
}

impl PendingAccess {
    fn complete(&mut self, status: StatusCode) {
        self.recorded = true;
        record_access(
            &self.route,
            &self.method,
            &self.uri,
            status,
            self.request_id.as_deref(),
            self.start,
        );
    }
}

impl Drop for PendingAccess {
    fn drop(&mut self) {
        if self.recorded {
            return;
        }
        tracing::warn!(
            target: ACCESS_LOG_TARGET,
            route = %self.route,
            method = %self.method,
            uri = %self.uri,
            status = CANCELLED,
            elapsed = ?self.start.elapsed(),
            request_id = self.request_id.as_deref().unwrap_or("-"),
            "request cancelled"
        );
        metrics::record_request(&self.route, self.method.as_str(), CANCELLED, self.start);
    }
}

/// Status label for requests dropped before a response was produced.
const CANCELLED: &str = "cancelled";

/// Emit one access record and the matching metrics sample.
pub fn record_access(
    route: &str,
    method: &Method,
    uri: &Uri,
    status: StatusCode,
    request_id: Option<&str>,
    start: Instant,
) {
    tracing::info!(
        target: ACCESS_LOG_TARGET,
        route = %route,
        method = %method,
        uri = %uri,
        status = status.as_u16(),
        elapsed = ?start.elapsed(),
        request_id = request_id.unwrap_or("-"),
        "request handled"
    );
    metrics::record_request(route, method.as_str(), status.as_str(), start);
}

/// The `x-request-id` header value, if present and printable.
pub fn request_id<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
