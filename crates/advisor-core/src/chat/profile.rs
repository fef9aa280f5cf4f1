//! Minimal user profile and the one-time name prompt.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::prompts;

/// What the advisor knows about the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl UserProfile {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the name if none is known yet.
    ///
    /// Returns `false` when the value is blank or a name was already set.
    pub fn set_name(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.name.is_some() {
            return false;
        }
        self.name = Some(trimmed.to_string());
        true
    }

    /// Supplementary instruction for the backend, when a name is known.
    pub fn instruction(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(|name| prompts::PROFILE_NOTE_TEMPLATE.replace("{name}", name))
    }
}

/// Out-of-band request for the user's name.
///
/// Asked at most once per session, before the first ordinary message, and
/// only when no name is known. `None` means the user declined.
pub trait NamePrompt {
    fn ask_name(&mut self) -> impl Future<Output = Option<String>>;
}

/// Never asks; always declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipNamePrompt;

impl NamePrompt for SkipNamePrompt {
    async fn ask_name(&mut self) -> Option<String> {
        None
    }
}
