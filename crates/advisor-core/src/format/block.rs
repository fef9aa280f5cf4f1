//! Line-oriented block formatting: headings, bullet lists and breaks.

use super::escape::escape_html;
use super::inline::format_inline;

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Heading { level: usize, text: &'a str },
    Bullet(&'a str),
    Prose,
}

impl<'a> Line<'a> {
    /// Heading detection runs first, so a line is never both.
    fn classify(line: &'a str) -> Self {
        if let Some((level, text)) = heading(line) {
            Line::Heading { level, text }
        } else if let Some(text) = bullet(line) {
            Line::Bullet(text)
        } else {
            Line::Prose
        }
    }
}

/// Escapes raw message text and formats it.
pub fn format_message(raw: &str) -> String {
    format_block(&escape_html(raw))
}

/// Formats already-escaped multi-line text into HTML.
///
/// Headings and bullet items never emit a trailing break. A prose line gets a
/// `<br>` before the next line when either line is blank, or when the next
/// line is itself prose.
pub fn format_block(escaped: &str) -> String {
    let lines: Vec<&str> = escaped
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();

    let mut out = String::with_capacity(escaped.len() + 16);
    let mut in_list = false;

    for (idx, line) in lines.iter().enumerate() {
        match Line::classify(line) {
            Line::Heading { level, text } => {
                close_list(&mut out, &mut in_list);
                out.push_str(&format!("<h{level}>{}</h{level}>", format_inline(text)));
            }
            Line::Bullet(text) => {
                if !in_list {
                    out.push_str("<ul>");
                    in_list = true;
                }
                out.push_str("<li>");
                out.push_str(&format_inline(text));
                out.push_str("</li>");
            }
            Line::Prose => {
                close_list(&mut out, &mut in_list);
                out.push_str(&format_inline(line));
                if let Some(next) = lines.get(idx + 1)
                    && needs_break(line, next)
                {
                    out.push_str("<br>");
                }
            }
        }
    }

    close_list(&mut out, &mut in_list);
    out
}

fn close_list(out: &mut String, in_list: &mut bool) {
    if *in_list {
        out.push_str("</ul>");
        *in_list = false;
    }
}

fn needs_break(current: &str, next: &str) -> bool {
    if is_blank(current) || is_blank(next) {
        return true;
    }
    Line::classify(next) == Line::Prose
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// `#{1,6}`, then whitespace, then the heading text.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    let text = rest.trim_start_matches([' ', '\t']);
    if text.len() == rest.len() {
        return None;
    }
    Some((level, text))
}

/// Optional indent, one of `-`, `*`, `+`, then whitespace, then the item text.
fn bullet(line: &str) -> Option<&str> {
    let body = line.trim_start_matches([' ', '\t']);
    if !body.starts_with(['-', '*', '+']) {
        return None;
    }
    let rest = &body[1..];
    let text = rest.trim_start_matches([' ', '\t']);
    if text.len() == rest.len() {
        return None;
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_list_then_prose() {
        assert_eq!(
            format_block("# Title\n- one\n- two\nplain"),
            "<h1>Title</h1><ul><li>one</li><li>two</li></ul>plain"
        );
    }

    #[test]
    fn test_prose_lines_get_breaks() {
        assert_eq!(format_block("first\nsecond"), "first<br>second");
    }

    #[test]
    fn test_blank_line_forces_breaks() {
        assert_eq!(format_block("a\n\nb"), "a<br><br>b");
    }

    #[test]
    fn test_one_break_per_blank_transition() {
        for blanks in 0..5 {
            let text = format!("a\n{}b", "\n".repeat(blanks));
            let html = format_block(&text);
            assert_eq!(html.matches("<br>").count(), blanks + 1, "{html}");
            assert!(html.starts_with('a') && html.ends_with('b'));
        }
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        assert_eq!(format_block("a\n   \nb"), "a<br>   <br>b");
    }

    #[test]
    fn test_no_break_into_heading_or_bullet() {
        assert_eq!(format_block("intro\n- x"), "intro<ul><li>x</li></ul>");
        assert_eq!(format_block("intro\n## Sub"), "intro<h2>Sub</h2>");
    }

    #[test]
    fn test_blank_line_before_heading_still_breaks() {
        assert_eq!(format_block("a\n\n# T"), "a<br><br><h1>T</h1>");
    }

    #[test]
    fn test_list_closed_at_end() {
        assert_eq!(
            format_block("- a\n+ b\n  * c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        assert_eq!(
            format_block("- a\n\n- b"),
            "<ul><li>a</li></ul><br><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(format_block("###### six"), "<h6>six</h6>");
        assert_eq!(format_block("####### seven"), "####### seven");
        assert_eq!(format_block("#hashtag"), "#hashtag");
    }

    #[test]
    fn test_heading_interior_is_inline_formatted() {
        assert_eq!(
            format_block("## The **best** pick"),
            "<h2>The <strong>best</strong> pick</h2>"
        );
    }

    #[test]
    fn test_emphasis_line_is_not_a_bullet() {
        assert_eq!(
            format_block("**Note:** in stock"),
            "<strong>Note:</strong> in stock"
        );
        assert_eq!(format_block("*italic* start"), "<em>italic</em> start");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(format_block("a\r\nb"), "a<br>b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_block(""), "");
    }

    #[test]
    fn test_message_is_escaped_before_formatting() {
        assert_eq!(
            format_message("<b>hi</b> **x**"),
            "&lt;b&gt;hi&lt;/b&gt; <strong>x</strong>"
        );
        assert_eq!(
            format_message("# <script>alert(1)</script>"),
            "<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"
        );
    }
}
