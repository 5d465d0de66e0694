//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use vanish::http::middleware::ACCESS_LOG_TARGET;
use vanish::routing::{handler, PathParams, Route, RouteTable};

pub const STYLESHEET: &str = "body { color: #222; }";
pub const CUSTOM_NOT_FOUND: &str = "custom not found";

async fn index() -> &'static str {
    "Index"
}

async fn styleguide() -> &'static str {
    "Styleguide"
}

async fn new_message() -> &'static str {
    "NewMessage"
}

async fn show_message(params: PathParams) -> String {
    format!("ShowMessage:{}", params.get("token").unwrap_or_default())
}

async fn delete_message(params: PathParams) -> String {
    format!("DeleteMessage:{}", params.get("token").unwrap_or_default())
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, CUSTOM_NOT_FOUND)
}

/// The application's route shape with handlers that answer with their own
/// route name, so tests can see which one ran.
pub fn marker_table() -> RouteTable {
    RouteTable::new(vec![
        Route::new("Index", Method::GET, "/", handler(index)),
        Route::new("Styleguide", Method::GET, "/styleguide", handler(styleguide)),
        Route::new("NewMessage", Method::POST, "/", handler(new_message)),
        Route::new("ShowMessage", Method::GET, "/{token}/", handler(show_message)),
        Route::new("DeleteMessage", Method::DELETE, "/{token}/", handler(delete_message)),
    ])
    .expect("marker table is valid")
}

/// Assets directory holding `app.css` and `img/logo.txt`.
pub fn assets_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("app.css"), STYLESHEET).expect("write app.css");
    std::fs::create_dir(dir.path().join("img")).expect("create img dir");
    std::fs::write(dir.path().join("img").join("logo.txt"), "logo").expect("write logo");
    dir
}

pub fn marker_router(assets: &TempDir) -> Router {
    vanish::build_router(marker_table(), assets.path(), handler(not_found))
}

/// Send one request through the router.
pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, HeaderMap, String) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    let res = router.clone().oneshot(req).await.expect("infallible");

    let status = res.status();
    let headers = res.headers().clone();
    let body = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    (status, headers, String::from_utf8_lossy(&body).into_owned())
}

/// Tracing layer counting access records, keyed by route name.
#[derive(Clone, Default)]
pub struct AccessCounter {
    total: Arc<AtomicUsize>,
    routes: Arc<std::sync::Mutex<Vec<String>>>,
}

impl AccessCounter {
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

struct RouteField(Option<String>);

impl tracing::field::Visit for RouteField {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "route" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "route" {
            self.0 = Some(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for AccessCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != ACCESS_LOG_TARGET {
            return;
        }
        let mut route = RouteField(None);
        event.record(&mut route);

        self.total.fetch_add(1, Ordering::SeqCst);
        self.routes
            .lock()
            .unwrap()
            .push(route.0.unwrap_or_default());
    }
}
