//! Plain-text extraction from formatted message markup.

/// Strips formatting markup back to readable text.
///
/// `<br>` becomes a newline, headings and list items start on their own
/// line, and entities produced by [`super::escape_html`] are decoded.
pub fn to_plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pending_newline = false;
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(tag_body) = rest.strip_prefix('<')
            && let Some(end) = tag_body.find('>')
        {
            let tag = &tag_body[..end];
            rest = &tag_body[end + 1..];
            match tag {
                "br" | "br/" | "br /" => {
                    flush_newline(&mut out, &mut pending_newline);
                    out.push('\n');
                }
                _ if is_block_tag(tag.trim_start_matches('/')) => {
                    pending_newline = !out.is_empty() && !out.ends_with('\n');
                }
                _ => {}
            }
            continue;
        }

        let text_end = rest.find('<').unwrap_or(rest.len());
        let text = &rest[..text_end.max(1)];
        rest = &rest[text.len()..];
        if !text.is_empty() {
            flush_newline(&mut out, &mut pending_newline);
            out.push_str(&unescape_html(text));
        }
    }

    out
}

fn flush_newline(out: &mut String, pending: &mut bool) {
    if std::mem::take(pending) {
        out.push('\n');
    }
}

fn is_block_tag(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "li")
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
