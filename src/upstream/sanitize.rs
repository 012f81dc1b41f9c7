//! Cleans up raw upstream error bodies before they are echoed to a caller.

use reqwest::StatusCode;

const MAX_ERROR_CHARS: usize = 200;

/// Turns a non-JSON upstream body into a short single-line message.
///
/// HTML pages (gateway error pages and the like) are replaced by the status
/// reason, everything else is collapsed to one line and capped.
pub fn error_text(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    };

    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || collapsed.starts_with('<') {
        return fallback();
    }

    truncate(&collapsed, MAX_ERROR_CHARS)
}

/// Caps an already readable message, such as a JSON `error.message`.
pub fn cap(text: &str) -> String {
    truncate(text, MAX_ERROR_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
