//! Transcript rendering: labels, body markup and the scroll directive.

pub mod page;

use crate::chat::transcript::{EntryKind, Role, Transcript};
use crate::format::format_message;

/// Where the display surface should scroll after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPolicy {
    /// Bring the most recent block fully into view.
    #[default]
    ShowLatest,
    /// Put the latest user block near the top, `margin` units below it.
    /// Used once a reply has arrived so question and answer start are both visible.
    AlignLastUser { margin: usize },
}

/// Resolved scroll instruction. `target` indexes into `View::blocks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirective {
    ShowLatest { target: usize },
    AlignLastUser { target: usize, margin: usize },
}

impl ScrollDirective {
    pub fn target(self) -> usize {
        match self {
            ScrollDirective::ShowLatest { target }
            | ScrollDirective::AlignLastUser { target, .. } => target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub role: Role,
    pub kind: EntryKind,
    /// `None` only for the unanswered greeting.
    pub label: Option<&'static str>,
    /// Escaped and formatted body markup.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub blocks: Vec<RenderedBlock>,
    /// `None` when there is nothing to show.
    pub scroll: Option<ScrollDirective>,
}

/// Renders every entry in order.
///
/// The first assistant entry goes unlabeled while the transcript has no user
/// entry. `AlignLastUser` falls back to `ShowLatest` when no user entry exists.
pub fn render(transcript: &Transcript, policy: ScrollPolicy) -> View {
    let entries = transcript.entries();
    let first_assistant = entries.iter().position(|e| e.role == Role::Assistant);
    let hide_greeting_label = !transcript.has_user_entry();

    let blocks: Vec<RenderedBlock> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let unlabeled = hide_greeting_label && Some(idx) == first_assistant;
            RenderedBlock {
                role: entry.role,
                kind: entry.kind,
                label: (!unlabeled).then(|| entry.role.label()),
                body: format_message(&entry.content),
            }
        })
        .collect();

    let scroll = blocks.len().checked_sub(1).map(|latest| match policy {
        ScrollPolicy::ShowLatest => ScrollDirective::ShowLatest { target: latest },
        ScrollPolicy::AlignLastUser { margin } => match transcript.last_user_index() {
            Some(target) => ScrollDirective::AlignLastUser { target, margin },
            None => ScrollDirective::ShowLatest { target: latest },
        },
    });

    View { blocks, scroll }
}

/// New scroll position that places a block `margin` units below the
/// viewport top.
///
/// `block_offset` is the block's position relative to the current top and is
/// negative when the block sits above it. Never goes below zero.
pub fn align_scroll_top(current_top: usize, block_offset: isize, margin: usize) -> usize {
    current_top
        .saturating_add_signed(block_offset)
        .saturating_sub(margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::transcript::ConversationEntry;

    fn seeded() -> Transcript {
        let mut t = Transcript::new();
        t.seed("Welcome to **the shop**!");
        t
    }

    #[test]
    fn test_unanswered_greeting_has_no_label() {
        let view = render(&seeded(), ScrollPolicy::ShowLatest);
        assert_eq!(view.blocks.len(), 1);
        assert_eq!(view.blocks[0].label, None);
        assert_eq!(view.blocks[0].body, "Welcome to <strong>the shop</strong>!");
        assert_eq!(view.scroll, Some(ScrollDirective::ShowLatest { target: 0 }));
    }

    #[test]
    fn test_labels_after_user_entry() {
        let mut t = seeded();
        t.submit_user("hi <there>");
        t.append_assistant("Hello!");
        let view = render(&t, ScrollPolicy::ShowLatest);

        let labels: Vec<_> = view.blocks.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec![Some("You"), Some("Advisor")]);
        assert_eq!(view.blocks[0].body, "hi &lt;there&gt;");
    }

    #[test]
    fn test_command_ack_before_any_user_entry_is_labeled() {
        let mut t = seeded();
        t.append_assistant("Nice to meet you, Dana!");
        let view = render(&t, ScrollPolicy::ShowLatest);
        assert_eq!(view.blocks[0].label, None);
        assert_eq!(view.blocks[1].label, Some("Advisor"));
    }

    #[test]
    fn test_restored_history_labels_everything() {
        let t = Transcript::from_entries(vec![
            ConversationEntry::assistant("Earlier answer"),
            ConversationEntry::user("question"),
        ]);
        let view = render(&t, ScrollPolicy::ShowLatest);
        assert!(view.blocks.iter().all(|b| b.label.is_some()));
    }

    #[test]
    fn test_placeholder_is_rendered_with_kind() {
        let mut t = seeded();
        t.submit_user("hello");
        t.append_placeholder("Typing...");
        let view = render(&t, ScrollPolicy::ShowLatest);
        assert_eq!(view.blocks[1].kind, EntryKind::Placeholder);
        assert_eq!(view.scroll, Some(ScrollDirective::ShowLatest { target: 1 }));
    }

    #[test]
    fn test_align_policy_targets_last_user_block() {
        let mut t = seeded();
        t.submit_user("first");
        t.append_assistant("one");
        t.submit_user("second");
        t.append_assistant("a long\n\nanswer");
        let view = render(&t, ScrollPolicy::AlignLastUser { margin: 12 });
        assert_eq!(
            view.scroll,
            Some(ScrollDirective::AlignLastUser { target: 2, margin: 12 })
        );
    }

    #[test]
    fn test_align_policy_without_user_falls_back() {
        let view = render(&seeded(), ScrollPolicy::AlignLastUser { margin: 12 });
        assert_eq!(view.scroll, Some(ScrollDirective::ShowLatest { target: 0 }));
    }

    #[test]
    fn test_empty_transcript_has_no_scroll() {
        let view = render(&Transcript::new(), ScrollPolicy::ShowLatest);
        assert!(view.blocks.is_empty());
        assert_eq!(view.scroll, None);
    }

    #[test]
    fn test_align_scroll_top() {
        assert_eq!(align_scroll_top(100, 250, 12), 338);
        assert_eq!(align_scroll_top(100, -40, 12), 48);
        assert_eq!(align_scroll_top(10, -40, 12), 0);
        assert_eq!(align_scroll_top(0, 5, 12), 0);
    }
}
