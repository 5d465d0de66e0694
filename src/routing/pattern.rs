//! Path pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse templates like `/{token}/` into literal and placeholder segments
//! - Match a request path against a compiled pattern
//! - Report trailing-slash mismatches so the dispatcher can redirect
//!
//! # Design Decisions
//! - Placeholders match exactly one non-empty path component
//! - No regex: segment-by-segment comparison
//! - Bound values are the raw component text (no percent-decoding)

use std::fmt;

use crate::routing::route::RouteError;

/// A single component of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request component exactly (case-sensitive).
    Literal(String),
    /// Binds any non-empty component under the given name.
    Param(String),
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    trailing_slash: bool,
}

/// Outcome of matching a path against a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// Segments and trailing slash both agree.
    Exact(PathParams),
    /// Segments agree but the trailing slash does not.
    SlashMismatch,
    NoMatch,
}

/// Placeholder values bound while matching a request path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    /// Look up a bound placeholder by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl PathPattern {
    /// Parse a path template.
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        let malformed = |reason: &str| RouteError::MalformedPattern {
            pattern: source.to_string(),
            reason: reason.to_string(),
        };

        let body = source
            .strip_prefix('/')
            .ok_or_else(|| malformed("must start with '/'"))?;

        if body.is_empty() {
            return Ok(Self {
                source: source.to_string(),
                segments: Vec::new(),
                trailing_slash: true,
            });
        }

        let (body, trailing_slash) = match body.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        let mut segments = Vec::new();
        for raw in body.split('/') {
            if raw.is_empty() {
                return Err(malformed("empty path segment"));
            }
            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    if !is_identifier(name) {
                        return Err(malformed("placeholder name must be an identifier"));
                    }
                    if segments.iter().any(|s| matches!(s, Segment::Param(n) if n == name)) {
                        return Err(malformed("placeholder name used twice"));
                    }
                    Segment::Param(name.to_string())
                }
                None if raw.contains('{') || raw.contains('}') => {
                    return Err(malformed("braces must enclose a whole segment"));
                }
                None => Segment::Literal(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            trailing_slash,
        })
    }

    /// The template text this pattern was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Shape used for conflict detection: placeholder names are erased, so
    /// `/{a}/` and `/{b}/` compare equal.
    pub(crate) fn shape(&self) -> String {
        let mut shape = String::from("/");
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => shape.push_str(text),
                Segment::Param(_) => shape.push_str("{}"),
            }
            shape.push('/');
        }
        if !self.trailing_slash && !self.segments.is_empty() {
            shape.pop();
        }
        shape
    }

    /// Match a request path.
    pub fn matches(&self, path: &str) -> PathMatch {
        let Some(body) = path.strip_prefix('/') else {
            return PathMatch::NoMatch;
        };

        // "/" is the only path with zero components.
        let (components, trailing_slash): (Vec<&str>, bool) = if body.is_empty() {
            (Vec::new(), true)
        } else {
            match body.strip_suffix('/') {
                Some(rest) => (rest.split('/').collect(), true),
                None => (body.split('/').collect(), false),
            }
        };

        if components.len() != self.segments.len() {
            return PathMatch::NoMatch;
        }

        let mut params = PathParams::default();
        for (segment, component) in self.segments.iter().zip(&components) {
            match segment {
                Segment::Literal(text) if text == component => {}
                Segment::Param(name) if !component.is_empty() => {
                    params.values.push((name.clone(), (*component).to_string()));
                }
                _ => return PathMatch::NoMatch,
            }
        }

        if trailing_slash == self.trailing_slash {
            PathMatch::Exact(params)
        } else {
            PathMatch::SlashMismatch
        }
    }

    /// Rewrite `path` to this pattern's trailing-slash form.
    pub fn canonicalize(&self, path: &str) -> String {
        let trimmed = path.trim_end_matches('/');
        if self.trailing_slash {
            format!("{trimmed}/")
        } else if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(matches!(pattern.matches("/"), PathMatch::Exact(p) if p == PathParams::default()));
        assert_eq!(pattern.matches("/abc"), PathMatch::NoMatch);
        assert_eq!(pattern.matches("//"), PathMatch::NoMatch);
    }

    #[test]
    fn test_placeholder_binding() {
        let pattern = PathPattern::parse("/{token}/").unwrap();

        match pattern.matches("/abc123/") {
            PathMatch::Exact(params) => assert_eq!(params.get("token"), Some("abc123")),
            other => panic!("expected exact match, got {:?}", other),
        }

        assert_eq!(pattern.matches("/abc123"), PathMatch::SlashMismatch);
        assert_eq!(pattern.matches("/"), PathMatch::NoMatch);
        assert_eq!(pattern.matches("/a/b/"), PathMatch::NoMatch);
        assert_eq!(pattern.matches("//"), PathMatch::NoMatch);
    }

    #[test]
    fn test_literal_slash_mismatch() {
        let pattern = PathPattern::parse("/styleguide").unwrap();
        assert!(matches!(pattern.matches("/styleguide"), PathMatch::Exact(_)));
        assert_eq!(pattern.matches("/styleguide/"), PathMatch::SlashMismatch);
        assert_eq!(pattern.matches("/Styleguide"), PathMatch::NoMatch);
    }

    #[test]
    fn test_mixed_segments() {
        let pattern = PathPattern::parse("/todos/{todo_id}/items/{item}").unwrap();
        match pattern.matches("/todos/7/items/x") {
            PathMatch::Exact(params) => {
                assert_eq!(params.get("todo_id"), Some("7"));
                assert_eq!(params.get("item"), Some("x"));
                assert_eq!(params.get("todos"), None);
            }
            other => panic!("expected exact match, got {:?}", other),
        }
        assert_eq!(pattern.matches("/todos/7/other/x"), PathMatch::NoMatch);
    }

    #[test]
    fn test_malformed_patterns() {
        for bad in ["", "styleguide", "//", "/a//b", "/{}", "/{1x}", "/{a}/{a}", "/x{a}", "/{a"] {
            assert!(
                matches!(PathPattern::parse(bad), Err(RouteError::MalformedPattern { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_shape_erases_names() {
        let a = PathPattern::parse("/{token}/").unwrap();
        let b = PathPattern::parse("/{id}/").unwrap();
        let c = PathPattern::parse("/{id}").unwrap();
        assert_eq!(a.shape(), b.shape());
        assert_ne!(a.shape(), c.shape());
        assert_eq!(PathPattern::parse("/").unwrap().shape(), "/");
    }

    #[test]
    fn test_canonicalize() {
        let slashed = PathPattern::parse("/{token}/").unwrap();
        let bare = PathPattern::parse("/styleguide").unwrap();
        assert_eq!(slashed.canonicalize("/abc"), "/abc/");
        assert_eq!(bare.canonicalize("/styleguide/"), "/styleguide");
    }
}
