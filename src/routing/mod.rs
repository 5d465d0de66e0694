//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     Route[] (name, method, pattern, handler)
//!     → pattern.rs (parse templates)
//!     → route.rs (reject malformed / conflicting routes)
//!     → dispatcher.rs (wrap handlers in the access logger, freeze)
//!
//! Incoming Request (method, path)
//!     → /static/* → asset service
//!     → first matching route → handler (or strict-slash redirect)
//!     → otherwise → not-found handler
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod dispatcher;
pub mod pattern;
pub mod route;

pub use dispatcher::{build_router, Dispatcher, Resolution, STATIC_PREFIX};
pub use pattern::{PathMatch, PathParams, PathPattern, Segment};
pub use route::{handler, CompiledRoute, Handler, Route, RouteError, RouteTable};
