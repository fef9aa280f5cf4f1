//! Conversation persistence across runs.
//!
//! The whole conversation is one pretty-printed JSON document:
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "saved_at": "2026-03-02T10:15:00Z",
//!   "profile": { "name": "Dana" },
//!   "entries": [{ "role": "user", "content": "hello", "kind": "message" }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatSession, ConversationEntry, UserProfile};
use crate::config::paths;

/// Current schema version for saved conversations.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    pub schema_version: u32,
    pub saved_at: String,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub entries: Vec<ConversationEntry>,
}

impl SavedSession {
    /// Snapshot of `session`. Placeholders are left out.
    pub fn capture(session: &ChatSession) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            saved_at: chrono_timestamp(),
            profile: session.profile().clone(),
            entries: session
                .transcript()
                .entries()
                .iter()
                .filter(|e| !e.is_placeholder())
                .cloned()
                .collect(),
        }
    }
}

fn chrono_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Reads and writes the saved conversation file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at ${ADVISOR_HOME}/session.json.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved conversation. Returns `None` if nothing was saved.
    pub fn load(&self) -> Result<Option<SavedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;
        let saved: SavedSession = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        if saved.schema_version != SCHEMA_VERSION {
            bail!(
                "Unsupported session schema version {} in {} (expected {SCHEMA_VERSION})",
                saved.schema_version,
                self.path.display()
            );
        }

        Ok(Some(saved))
    }

    /// Writes a snapshot of `session`, replacing any previous one.
    pub fn save(&self, session: &ChatSession) -> Result<()> {
        let saved = SavedSession::capture(session);
        let json = serde_json::to_string_pretty(&saved).context("Failed to serialize session")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write session to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        tracing::debug!(path = %self.path.display(), entries = saved.entries.len(), "session saved");
        Ok(())
    }

    /// Deletes the saved conversation. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(true)
    }
}
