//! Ordered conversation entries.
//!
//! The transcript is append-only apart from two evictions: the seed greeting
//! (removed by the first user submission) and the transient placeholder
//! (removed before the backend is called).

use serde::{Deserialize, Serialize};

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role string used in backend requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Label shown above the entry.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Advisor",
        }
    }
}

/// Lifecycle tag of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Ordinary message
    #[default]
    Message,
    /// Initial welcome, evicted on the first user submission
    SeedGreeting,
    /// "Please wait" stand-in shown while a reply is pending
    Placeholder,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub kind: EntryKind,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            kind: EntryKind::Message,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            kind: EntryKind::Message,
        }
    }

    pub fn is_seed_greeting(&self) -> bool {
        self.kind == EntryKind::SeedGreeting
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == EntryKind::Placeholder
    }
}

/// The single conversation owned by a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<ConversationEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a transcript from saved entries, dropping placeholders.
    pub fn from_entries(entries: Vec<ConversationEntry>) -> Self {
        Self {
            entries: entries.into_iter().filter(|e| !e.is_placeholder()).collect(),
        }
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Appends the seed greeting. No-op unless the transcript is empty.
    pub fn seed(&mut self, greeting: impl Into<String>) {
        if !self.entries.is_empty() {
            return;
        }
        self.entries.push(ConversationEntry {
            role: Role::Assistant,
            content: greeting.into(),
            kind: EntryKind::SeedGreeting,
        });
    }

    /// Appends a user entry with the trimmed text, evicting the seed greeting.
    ///
    /// Returns `false` (and changes nothing) when the text is blank.
    pub fn submit_user(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        if let Some(idx) = self.entries.iter().position(ConversationEntry::is_seed_greeting) {
            self.entries.remove(idx);
        }
        self.entries.push(ConversationEntry::user(trimmed));
        true
    }

    /// Appends an assistant reply.
    pub fn append_assistant(&mut self, text: impl Into<String>) {
        self.entries.push(ConversationEntry::assistant(text));
    }

    /// Appends the transient "please wait" entry.
    pub fn append_placeholder(&mut self, text: impl Into<String>) {
        self.entries.push(ConversationEntry {
            role: Role::Assistant,
            content: text.into(),
            kind: EntryKind::Placeholder,
        });
    }

    /// Removes the most recent placeholder, if any.
    pub fn remove_transient(&mut self) -> Option<ConversationEntry> {
        let idx = self.entries.iter().rposition(ConversationEntry::is_placeholder)?;
        Some(self.entries.remove(idx))
    }

    pub fn has_user_entry(&self) -> bool {
        self.entries.iter().any(|e| e.role == Role::User)
    }

    /// Index of the most recent user entry.
    pub fn last_user_index(&self) -> Option<usize> {
        self.entries.iter().rposition(|e| e.role == Role::User)
    }
}
