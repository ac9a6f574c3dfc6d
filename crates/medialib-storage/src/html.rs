//! Shared markup and URL helpers for storage providers.

use medialib_core::MediaItem;

/// Escape text for use inside HTML element content or a double-quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Join a base URL and a relative path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Anchor opening `href` in a new tab, labelled with the item title.
pub fn link_to(href: &str, item: &MediaItem) -> String {
    let title = escape_html(item.title());
    format!(
        "<a href=\"{}\" title=\"{}\" target=\"_blank\">{}</a>",
        escape_html(href),
        title,
        title
    )
}
