//! Static asset serving.
//!
//! Requests arrive with the `/static` prefix still attached; it is stripped
//! before the path is resolved against the assets directory. Missing files
//! get the file server's plain 404, not the application's not-found page.

use std::path::Path;

use axum::body::Body;
use axum::http::uri::PathAndQuery;
use axum::http::{Request, Response, Uri};
use axum::response::IntoResponse;
use tower::util::BoxCloneSyncService;
use tower::ServiceExt;
use tower_http::services::fs::ServeFileSystemResponseBody;
use tower_http::services::ServeDir;

use crate::routing::dispatcher::STATIC_PREFIX;
use crate::routing::Handler;

/// File service rooted at `dir`, answering `/static/...` paths.
pub fn serve_assets(dir: impl AsRef<Path>) -> Handler {
    let service = ServeDir::new(dir.as_ref())
        .map_request(strip_static_prefix)
        .map_response(|res: Response<ServeFileSystemResponseBody>| res.into_response());
    BoxCloneSyncService::new(service)
}

/// Rewrite `/static/css/app.css?v=2` to `/css/app.css?v=2`.
fn strip_static_prefix(req: Request<Body>) -> Request<Body> {
    let (mut parts, body) = req.into_parts();

    let bare_prefix = STATIC_PREFIX.trim_end_matches('/');
    if let Some(rest) = parts
        .uri
        .path()
        .strip_prefix(bare_prefix)
        .filter(|rest| rest.starts_with('/'))
    {
        let path_and_query = match parts.uri.query() {
            Some(query) => format!("{rest}?{query}"),
            None => rest.to_string(),
        };

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.path_and_query = PathAndQuery::try_from(path_and_query).ok();
        if let Ok(uri) = Uri::from_parts(uri_parts) {
            parts.uri = uri;
        }
    }

    Request::from_parts(parts, body)
}
