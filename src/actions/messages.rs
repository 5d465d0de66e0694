//! Message actions.
//!
//! Creating, showing and deleting messages needs a message store, which is
//! not part of this service. Each action answers `501 Not Implemented` with
//! the JSON envelope clients already expect (`success` plus detail).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::PathParams;

#[derive(Debug, Serialize)]
struct Outcome<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    error: &'static str,
}

const NO_STORE: &str = "message storage is not configured";

fn unavailable(token: Option<&str>) -> Response {
    let body = Outcome {
        success: false,
        token,
        error: NO_STORE,
    };
    (StatusCode::NOT_IMPLEMENTED, Json(body)).into_response()
}

pub async fn new_message() -> Response {
    unavailable(None)
}

pub async fn show_message(params: PathParams) -> Response {
    unavailable(params.get("token"))
}

pub async fn delete_message(params: PathParams) -> Response {
    unavailable(params.get("token"))
}
