//! Prompt text for the advisor persona.

/// Built-in persona instruction, used when config supplies none.
pub const DEFAULT_PERSONA_PROMPT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/persona_prompt.md"
));

/// Supplementary note sent when the user's name is known. `{name}` is replaced.
pub const PROFILE_NOTE_TEMPLATE: &str =
    "The customer's name is {name}. Address them by name when it feels natural.";

/// Default welcome shown before the user says anything.
pub const DEFAULT_GREETING: &str = "Hi! I'm your product advisor. Tell me what you're shopping for and I'll help you find the right fit.";

/// Default transient entry shown while a reply is pending.
pub const DEFAULT_PLACEHOLDER: &str = "Typing...";

/// Substituted when the backend answers without a reply.
pub const NO_REPLY_TEXT: &str = "No reply received.";
