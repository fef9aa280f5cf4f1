//! Inline emphasis markers within a single escaped line.

/// Converts `**strong**`, `*em*` and `_em_` markers into HTML.
///
/// Passes run in that order. A single marker only counts when it is not part
/// of a doubled run on either side, so `**` never produces emphasis and an
/// unmatched marker stays literal.
pub fn format_inline(line: &str) -> String {
    let strong = replace_paired(line, '*', "strong");
    let emphasis = replace_single(&strong, '*', "em");
    replace_single(&emphasis, '_', "em")
}

/// Replaces `mm…mm` runs (shortest match, non-empty content).
fn replace_paired(text: &str, marker: char, tag: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let doubled = |j: usize| chars[j] == marker && chars.get(j + 1) == Some(&marker);

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if doubled(i)
            && let Some(close) = (i + 3..chars.len()).find(|&j| doubled(j))
        {
            push_wrapped(&mut out, tag, &chars[i + 2..close]);
            i = close + 2;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Replaces `m…m` runs where neither marker touches another `m`.
fn replace_single(text: &str, marker: char, tag: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let lone = |j: usize| {
        chars[j] == marker
            && (j == 0 || chars[j - 1] != marker)
            && chars.get(j + 1) != Some(&marker)
    };

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        if lone(i)
            && let Some(close) = (i + 2..chars.len()).find(|&j| lone(j))
        {
            push_wrapped(&mut out, tag, &chars[i + 1..close]);
            i = close + 1;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn push_wrapped(out: &mut String, tag: &str, inner: &[char]) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.extend(inner);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_and_emphasis_do_not_merge() {
        assert_eq!(
            format_inline("*a* **b** *c*"),
            "<em>a</em> <strong>b</strong> <em>c</em>"
        );
    }

    #[test]
    fn test_strong_is_non_greedy() {
        assert_eq!(
            format_inline("**one** and **two**"),
            "<strong>one</strong> and <strong>two</strong>"
        );
    }

    #[test]
    fn test_underscore_emphasis() {
        assert_eq!(format_inline("try _this_ one"), "try <em>this</em> one");
        assert_eq!(format_inline("__not__"), "__not__");
    }

    #[test]
    fn test_unmatched_markers_stay_literal() {
        assert_eq!(format_inline("5 * 3 = 15"), "5 * 3 = 15");
        assert_eq!(format_inline("**open only"), "**open only");
        assert_eq!(format_inline("snake_case"), "snake_case");
    }

    #[test]
    fn test_empty_spans_do_not_match() {
        assert_eq!(format_inline("**"), "**");
        assert_eq!(format_inline("****"), "****");
        assert_eq!(format_inline("__"), "__");
    }

    #[test]
    fn test_nested_emphasis_inside_strong() {
        assert_eq!(
            format_inline("**bold _it_**"),
            "<strong>bold <em>it</em></strong>"
        );
    }

    #[test]
    fn test_unicode_content() {
        assert_eq!(
            format_inline("**héllo 🎉** _ñ_"),
            "<strong>héllo 🎉</strong> <em>ñ</em>"
        );
    }

    #[test]
    fn test_repeated_application_is_stable() {
        for line in ["*a* **b** *c*", "plain", "_x_ and **y**", "5 * 3"] {
            let once = format_inline(line);
            assert_eq!(format_inline(&once), once);
        }
    }
}
