//! Request dispatch.
//!
//! # Responsibilities
//! - Send `/static/` requests straight to the asset service
//! - Find the first route whose method and pattern match
//! - Redirect to the canonical trailing-slash form (strict slash)
//! - Fall back to the not-found handler
//!
//! # Design Decisions
//! - Every handler is wrapped in the access logger once, at construction
//! - The dispatcher holds only read-only state and is cheap to clone
//! - No-match is a normal outcome, not an error

use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use futures_util::future::{self, BoxFuture};
use tower::util::BoxCloneSyncService;
use tower::{Layer, Service, ServiceExt};

use crate::http::middleware::logger::{
    record_access, request_id, LoggerLayer, NOT_FOUND_ROUTE, STATIC_ROUTE,
};
use crate::http::static_files;
use crate::routing::pattern::{PathMatch, PathParams};
use crate::routing::route::{CompiledRoute, Handler, RouteTable};

/// Path prefix reserved for static assets.
pub const STATIC_PREFIX: &str = "/static/";

/// What the dispatcher decided to do with a request.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// Served from the assets directory.
    Static,
    /// Handled by a declared route.
    Matched {
        route: &'a CompiledRoute,
        params: PathParams,
    },
    /// Redirected to the route's canonical path.
    Redirect {
        route: &'a CompiledRoute,
        location: String,
    },
    NotFound,
}

/// Table-driven request dispatcher.
#[derive(Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    assets: Handler,
    not_found: Handler,
}

impl Dispatcher {
    /// Wrap every route, the asset service and the not-found handler in the
    /// access logger.
    pub fn new(table: RouteTable, assets_dir: impl AsRef<Path>, not_found: Handler) -> Self {
        let routes = table.map_handlers(logged);
        let assets = logged(STATIC_ROUTE, static_files::serve_assets(assets_dir));
        let not_found = logged(NOT_FOUND_ROUTE, not_found);

        tracing::debug!(routes = routes.len(), "Dispatcher built");

        Self {
            routes: Arc::new(routes),
            assets,
            not_found,
        }
    }

    /// Decide how a request would be handled, without handling it.
    ///
    /// The returned redirect location carries no query string.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<'_> {
        if path.starts_with(STATIC_PREFIX) {
            return Resolution::Static;
        }

        for route in self.routes.iter() {
            if route.method != *method {
                continue;
            }
            match route.pattern.matches(path) {
                PathMatch::Exact(params) => return Resolution::Matched { route, params },
                PathMatch::SlashMismatch => {
                    return Resolution::Redirect {
                        route,
                        location: route.pattern.canonicalize(path),
                    }
                }
                PathMatch::NoMatch => {}
            }
        }

        Resolution::NotFound
    }
}

impl Service<Request<Body>> for Dispatcher {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let start = Instant::now();

        match self.resolve(req.method(), req.uri().path()) {
            Resolution::Static => Box::pin(self.assets.clone().oneshot(req)),
            Resolution::Matched { route, params } => {
                req.extensions_mut().insert(params);
                Box::pin(route.handler.clone().oneshot(req))
            }
            Resolution::Redirect { route, mut location } => {
                if let Some(query) = req.uri().query() {
                    location.push('?');
                    location.push_str(query);
                }
                tracing::debug!(route = %route.name, location = %location, "Strict slash redirect");

                let response = redirect(&location);
                record_access(
                    &route.name,
                    req.method(),
                    req.uri(),
                    response.status(),
                    request_id(&req).as_deref(),
                    start,
                );
                Box::pin(future::ready(Ok(response)))
            }
            Resolution::NotFound => Box::pin(self.not_found.clone().oneshot(req)),
        }
    }
}

/// Build the application router from a route table, the assets directory and
/// the designated not-found handler.
pub fn build_router(table: RouteTable, assets_dir: impl AsRef<Path>, not_found: Handler) -> Router {
    Router::new().fallback_service(Dispatcher::new(table, assets_dir, not_found))
}

fn logged(name: &str, handler: Handler) -> Handler {
    BoxCloneSyncService::new(LoggerLayer::new(name).layer(handler))
}

fn redirect(location: &str) -> Response {
    match HeaderValue::try_from(location) {
        Ok(value) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}

impl<S> FromRequestParts<S> for PathParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<PathParams>().cloned().unwrap_or_default())
    }
}
