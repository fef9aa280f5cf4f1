//! Conversation state: transcript, profile, commands and the turn controller.
//!
//! - `transcript`: ordered entries with seed/placeholder lifecycle rules
//! - `profile`: the user's optional name
//! - `commands`: slash commands intercepted before submission
//! - `session`: two-phase turn controller around the assistant backend

pub mod commands;
pub mod profile;
pub mod session;
pub mod transcript;

pub use profile::{NamePrompt, SkipNamePrompt, UserProfile};
pub use session::{ChatSession, SessionOptions, Submission, TurnOutcome};
pub use transcript::{ConversationEntry, EntryKind, Role, Transcript};
