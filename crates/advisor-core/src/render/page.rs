//! Standalone HTML snapshot of the chat widget.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::{ScrollDirective, View};
use crate::chat::transcript::EntryKind;
use crate::format::escape_html;

const TITLE: &str = "Product Advisor";

/// Builds a complete HTML page for `view`.
///
/// The scroll target carries `id="scroll-target"` plus `data-scroll-mode`
/// (and `data-scroll-margin` when aligning) for the page script.
pub fn to_html_document(view: &View) -> String {
    let mut out = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{TITLE}</title>
    <style>
        body {{
            font-family: system-ui, sans-serif;
            font-size: 15px;
            margin: 0;
            background-color: #f5f5f4;
        }}
        .chat {{
            max-width: 720px;
            margin: 0 auto;
            padding: 16px;
        }}
        .entry {{
            margin: 8px 0;
            padding: 10px 14px;
            border-radius: 10px;
            background-color: #ffffff;
        }}
        .entry.user {{
            background-color: #dbeafe;
        }}
        .entry[data-kind="placeholder"] {{
            color: #78716c;
            font-style: italic;
        }}
        .label {{
            font-weight: 600;
            margin-right: 6px;
        }}
    </style>
</head>
<body>
<div class="chat">
"#
    );

    let target = view.scroll.map(ScrollDirective::target);
    for (idx, block) in view.blocks.iter().enumerate() {
        let _ = write!(
            out,
            r#"<div class="entry {}" data-kind="{}""#,
            block.role.as_str(),
            kind_attr(block.kind)
        );
        if target == Some(idx)
            && let Some(directive) = view.scroll
        {
            out.push_str(&scroll_attrs(directive));
        }
        out.push('>');
        if let Some(label) = block.label {
            let _ = write!(out, r#"<span class="label">{}</span>"#, escape_html(label));
        }
        let _ = writeln!(out, r#"<div class="body">{}</div></div>"#, block.body);
    }

    out.push_str(
        r#"</div>
<script>
    const target = document.getElementById("scroll-target");
    if (target) {
        if (target.dataset.scrollMode === "align-last-user") {
            const margin = Number(target.dataset.scrollMargin || 0);
            const offset = target.getBoundingClientRect().top;
            window.scrollTo(0, Math.max(0, window.scrollY + offset - margin));
        } else {
            target.scrollIntoView({ block: "end" });
        }
    }
</script>
</body>
</html>
"#,
    );
    out
}

/// Writes the snapshot for `view` to `path`.
pub fn write_html_document(path: &Path, view: &View) -> Result<()> {
    fs::write(path, to_html_document(view))
        .with_context(|| format!("Failed to write HTML snapshot to {}", path.display()))
}

fn kind_attr(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Message => "message",
        EntryKind::SeedGreeting => "seed_greeting",
        EntryKind::Placeholder => "placeholder",
    }
}

fn scroll_attrs(directive: ScrollDirective) -> String {
    match directive {
        ScrollDirective::ShowLatest { .. } => {
            r#" id="scroll-target" data-scroll-mode="show-latest""#.to_string()
        }
        ScrollDirective::AlignLastUser { margin, .. } => format!(
            r#" id="scroll-target" data-scroll-mode="align-last-user" data-scroll-margin="{margin}""#
        ),
    }
}
