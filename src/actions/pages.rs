//! Landing page and style reference.

use axum::response::Html;

/// Expiry choices offered when creating a message, as (minutes, label).
pub const DELAYS: [(u32, &str); 5] = [
    (15, "15min"),
    (30, "30min"),
    (60, "1h"),
    (120, "2h"),
    (1440, "24h"),
];

/// Minutes used when the submitted delay is not one of [`DELAYS`].
pub const DEFAULT_DELAY_MINUTES: u32 = 15;

pub async fn index() -> Html<String> {
    let options: String = DELAYS
        .iter()
        .map(|(minutes, label)| {
            let selected = if *minutes == DEFAULT_DELAY_MINUTES { " selected" } else { "" };
            format!(r#"<option value="{minutes}"{selected}>{label}</option>"#)
        })
        .collect();

    Html(format!(
        concat!(
            "<!doctype html><html><head><title>vanish</title>",
            r#"<link rel="stylesheet" href="/static/app.css"></head><body>"#,
            r#"<form method="post" action="/">"#,
            r#"<textarea name="message" required></textarea>"#,
            r#"<select name="delay">{}</select>"#,
            r#"<button type="submit">Create</button></form></body></html>"#
        ),
        options
    ))
}

pub async fn styleguide() -> Html<&'static str> {
    Html(concat!(
        "<!doctype html><html><head><title>vanish styleguide</title>",
        r#"<link rel="stylesheet" href="/static/app.css"></head><body>"#,
        "<h1>Heading 1</h1><h2>Heading 2</h2><p>Body text</p>",
        r#"<button type="button">Button</button>"#,
        "</body></html>"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lists_every_delay() {
        let Html(page) = index().await;
        for (minutes, label) in DELAYS {
            assert!(page.contains(&format!(r#"value="{minutes}""#)));
            assert!(page.contains(&format!(">{label}</option>")));
        }
        assert!(page.contains(r#"value="15" selected>15min"#));
    }
}
