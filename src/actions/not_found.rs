//! Application not-found page.
//!
//! Negotiated on `Accept` the way browsers and API clients expect: HTML and
//! JSON are offered, the best acceptable one wins, and plain text is the
//! answer when neither is acceptable. No `Accept` header means HTML.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

const PAGE: &str = concat!(
    "<!doctype html><html><head><title>Not found</title></head>",
    "<body><h1>Not found</h1><p>This message does not exist or has expired.</p>",
    r#"<a href="/">Write a new message</a></body></html>"#
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Html,
    Json,
    Text,
}

/// Offered types, in server preference order.
const OFFERED: [(Format, &str, &str); 2] = [
    (Format::Html, "text", "html"),
    (Format::Json, "application", "json"),
];

/// One media range from an `Accept` header.
#[derive(Debug)]
struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    q: f32,
    order: usize,
}

/// How well a media range accepts an offered type.
#[derive(Debug, Clone, Copy)]
struct Priority {
    q: f32,
    specificity: u8,
    order: usize,
}

fn parse_accept(accept: &str) -> Vec<MediaRange<'_>> {
    let mut ranges = Vec::new();
    for (order, entry) in accept.split(',').enumerate() {
        let mut parts = entry.split(';').map(str::trim);
        let Some((kind, subtype)) = parts.next().and_then(|m| m.split_once('/')) else {
            continue;
        };
        let mut q = 1.0;
        for param in parts {
            if let Some((key, value)) = param.split_once('=') {
                if key.trim().eq_ignore_ascii_case("q") {
                    match value.trim().parse::<f32>() {
                        Ok(v) if (0.0..=1.0).contains(&v) => q = v,
                        _ => q = 0.0,
                    }
                }
            }
        }
        ranges.push(MediaRange {
            kind: kind.trim(),
            subtype: subtype.trim(),
            q,
            order,
        });
    }
    ranges
}

/// Most specific range matching `kind/subtype`; ties go to the higher q,
/// then to the earlier range.
fn priority(ranges: &[MediaRange<'_>], kind: &str, subtype: &str) -> Option<Priority> {
    let mut best: Option<Priority> = None;
    for range in ranges {
        let mut specificity = 0;
        if range.kind.eq_ignore_ascii_case(kind) {
            specificity |= 4;
        } else if range.kind != "*" {
            continue;
        }
        if range.subtype.eq_ignore_ascii_case(subtype) {
            specificity |= 2;
        } else if range.subtype != "*" {
            continue;
        }

        let candidate = Priority {
            q: range.q,
            specificity,
            order: range.order,
        };
        let better = match best {
            None => true,
            Some(b) => {
                (candidate.specificity, candidate.q) > (b.specificity, b.q)
                    || (candidate.specificity == b.specificity
                        && candidate.q == b.q
                        && candidate.order < b.order)
            }
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

fn negotiate(headers: &HeaderMap) -> Format {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) else {
        return Format::Html;
    };
    let ranges = parse_accept(accept);

    let mut chosen: Option<(Format, Priority)> = None;
    for (format, kind, subtype) in OFFERED {
        let Some(p) = priority(&ranges, kind, subtype).filter(|p| p.q > 0.0) else {
            continue;
        };
        // Earlier offers win full ties, so only a strictly better one replaces.
        let better = match chosen {
            None => true,
            Some((_, c)) => {
                p.q > c.q
                    || (p.q == c.q && p.specificity > c.specificity)
                    || (p.q == c.q && p.specificity == c.specificity && p.order < c.order)
            }
        };
        if better {
            chosen = Some((format, p));
        }
    }

    chosen.map_or(Format::Text, |(format, _)| format)
}

pub async fn not_found(headers: HeaderMap) -> Response {
    match negotiate(&headers) {
        Format::Html => (StatusCode::NOT_FOUND, Html(PAGE)).into_response(),
        Format::Json => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response(),
        Format::Text => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
