//! Route declarations and the compiled route table.
//!
//! # Responsibilities
//! - Hold the (name, method, pattern, handler) bindings
//! - Compile patterns once, at startup
//! - Reject malformed patterns and conflicting declarations
//!
//! # Design Decisions
//! - Construction is the only fallible step; the table is read-only afterwards
//! - Declaration order is preserved (first match wins)

use std::convert::Infallible;
use std::fmt;

use axum::body::Body;
use axum::handler::Handler as AxumHandler;
use axum::http::{Method, Request};
use axum::response::Response;
use thiserror::Error;
use tower::util::BoxCloneSyncService;

use crate::routing::pattern::PathPattern;

/// A type-erased request handler.
pub type Handler = BoxCloneSyncService<Request<Body>, Response, Infallible>;

/// Erase an axum handler (an async fn with extractors) into a [`Handler`].
pub fn handler<H, T>(h: H) -> Handler
where
    H: AxumHandler<T, ()>,
    T: 'static,
{
    BoxCloneSyncService::new(h.with_state(()))
}

/// Errors detected while building the route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("malformed pattern {pattern:?}: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("route {name:?} ({method} {pattern}) conflicts with route {existing:?}")]
    DuplicateRoute {
        name: String,
        existing: String,
        method: Method,
        pattern: String,
    },

    #[error("route name {0:?} declared more than once")]
    DuplicateName(String),
}

/// A route as declared, before compilation.
#[derive(Clone)]
pub struct Route {
    pub name: String,
    pub method: Method,
    pub pattern: String,
    pub handler: Handler,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        method: Method,
        pattern: impl Into<String>,
        handler: Handler,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            pattern: pattern.into(),
            handler,
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// A route whose pattern has been parsed.
#[derive(Clone)]
pub struct CompiledRoute {
    pub name: String,
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: Handler,
}

impl fmt::Debug for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoute")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Ordered, validated collection of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compile and validate a list of route declarations.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteError> {
        let mut compiled: Vec<CompiledRoute> = Vec::with_capacity(routes.len());

        for route in routes {
            let pattern = PathPattern::parse(&route.pattern)?;

            if compiled.iter().any(|r| r.name == route.name) {
                return Err(RouteError::DuplicateName(route.name));
            }

            let shape = pattern.shape();
            if let Some(existing) = compiled
                .iter()
                .find(|r| r.method == route.method && r.pattern.shape() == shape)
            {
                return Err(RouteError::DuplicateRoute {
                    name: route.name,
                    existing: existing.name.clone(),
                    method: route.method,
                    pattern: route.pattern,
                });
            }

            compiled.push(CompiledRoute {
                name: route.name,
                method: route.method,
                pattern,
                handler: route.handler,
            });
        }

        Ok(Self { routes: compiled })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Replace every handler, keeping names, methods and order.
    pub(crate) fn map_handlers<F>(self, mut f: F) -> Self
    where
        F: FnMut(&str, Handler) -> Handler,
    {
        let routes = self
            .routes
            .into_iter()
            .map(|CompiledRoute { name, method, pattern, handler }| {
                let handler = f(&name, handler);
                CompiledRoute {
                    name,
                    method,
                    pattern,
                    handler,
                }
            })
            .collect();
        Self { routes }
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a CompiledRoute;
    type IntoIter = std::slice::Iter<'a, CompiledRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
