//! HTML escaping for raw message text.

/// Escapes characters with structural meaning in HTML.
///
/// Everything else, including newlines and non-ASCII text, passes through
/// unchanged. Must run exactly once, before any formatting marker is applied.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
