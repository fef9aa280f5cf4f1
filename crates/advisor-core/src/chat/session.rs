//! Turn controller for the single conversation.
//!
//! A turn has two phases so the caller can render in between:
//! `submit` records the user's message and the placeholder, then
//! `complete` swaps the placeholder for the backend's answer.

use crate::chat::commands::{self, ParsedCommand};
use crate::chat::profile::{NamePrompt, UserProfile};
use crate::chat::transcript::{ConversationEntry, Transcript};
use crate::prompts;
use crate::providers::{AssistantBackend, ChatMessage, ProviderError};
use crate::render::{self, ScrollPolicy, View};

/// Text the session seeds, shows and sends on every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub greeting: String,
    pub placeholder: String,
    pub persona_prompt: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            greeting: prompts::DEFAULT_GREETING.to_string(),
            placeholder: prompts::DEFAULT_PLACEHOLDER.to_string(),
            persona_prompt: prompts::DEFAULT_PERSONA_PROMPT.trim().to_string(),
        }
    }
}

/// What `submit` did with an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, or input arrived while a turn was outstanding.
    Ignored,
    /// A slash command consumed the input and appended its acknowledgment.
    Handled,
    /// User entry and placeholder appended; call `complete` next.
    Pending,
}

/// How `complete` ended.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// No turn was pending.
    Idle,
    /// The backend's reply was appended.
    Replied,
    /// The backend answered without a reply; the fallback text was appended.
    NoReply,
    /// The request failed; an error entry was appended.
    Failed(ProviderError),
}

/// Owns the transcript and profile for one conversation.
#[derive(Debug, Clone)]
pub struct ChatSession {
    options: SessionOptions,
    transcript: Transcript,
    profile: UserProfile,
    name_asked: bool,
    input_enabled: bool,
}

impl ChatSession {
    /// Starts a fresh conversation seeded with the greeting.
    pub fn new(options: SessionOptions) -> Self {
        let mut transcript = Transcript::new();
        transcript.seed(options.greeting.clone());
        Self {
            options,
            transcript,
            profile: UserProfile::default(),
            name_asked: false,
            input_enabled: true,
        }
    }

    /// Continues a saved conversation. An empty history is seeded as usual.
    pub fn restore(
        options: SessionOptions,
        entries: Vec<ConversationEntry>,
        profile: UserProfile,
    ) -> Self {
        let mut transcript = Transcript::from_entries(entries);
        transcript.seed(options.greeting.clone());
        Self {
            options,
            transcript,
            profile,
            name_asked: false,
            input_enabled: true,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Sets the user's name directly, e.g. from a command-line flag.
    pub fn set_name(&mut self, name: &str) -> bool {
        self.name_asked = true;
        self.profile.set_name(name)
    }

    /// False while a turn is outstanding.
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// First phase of a turn.
    ///
    /// Runs the one-time name prompt before the first ordinary message when
    /// no name is known.
    pub async fn submit<P: NamePrompt>(&mut self, input: &str, prompt: &mut P) -> Submission {
        if !self.input_enabled {
            tracing::debug!("input ignored while a turn is outstanding");
            return Submission::Ignored;
        }

        let text = input.trim();
        if text.is_empty() {
            return Submission::Ignored;
        }

        if let Some(command) = commands::parse(text) {
            self.run_command(command);
            return Submission::Handled;
        }

        if self.profile.name().is_none() && !self.name_asked {
            self.name_asked = true;
            if let Some(name) = prompt.ask_name().await
                && self.profile.set_name(&name)
            {
                tracing::info!("user name collected from prompt");
            }
        }

        self.transcript.submit_user(text);
        self.transcript
            .append_placeholder(self.options.placeholder.clone());
        self.input_enabled = false;
        Submission::Pending
    }

    /// Second phase of a turn.
    ///
    /// Network failures become an assistant entry and are never returned as
    /// errors. Input is re-enabled on every path.
    pub async fn complete<B: AssistantBackend>(&mut self, backend: &B) -> TurnOutcome {
        if self.input_enabled {
            return TurnOutcome::Idle;
        }

        let outcome = self.exchange(backend).await;
        self.input_enabled = true;
        outcome
    }

    async fn exchange<B: AssistantBackend>(&mut self, backend: &B) -> TurnOutcome {
        self.transcript.remove_transient();
        let request = self.build_request();

        tracing::info!(messages = request.len(), "requesting advisor reply");
        match backend.complete(&request).await {
            Ok(Some(reply)) => {
                self.transcript.append_assistant(reply);
                TurnOutcome::Replied
            }
            Ok(None) => {
                tracing::warn!("backend returned no reply");
                self.transcript.append_assistant(prompts::NO_REPLY_TEXT);
                TurnOutcome::NoReply
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, error = %e, "advisor request failed");
                self.transcript
                    .append_assistant(format!("Sorry, something went wrong: {e}"));
                TurnOutcome::Failed(e)
            }
        }
    }

    /// Persona instruction, optional profile note, then the transcript.
    pub fn build_request(&self) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.options.persona_prompt.clone())];
        if let Some(note) = self.profile.instruction() {
            messages.push(ChatMessage::system(note));
        }
        messages.extend(
            self.transcript
                .entries()
                .iter()
                .filter(|e| !e.is_placeholder())
                .map(|e| ChatMessage {
                    role: e.role.as_str().to_string(),
                    content: e.content.clone(),
                }),
        );
        messages
    }

    /// Clears the conversation and seeds the greeting again. The name is kept
    /// but the prompt may be offered again if none was given.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.transcript.seed(self.options.greeting.clone());
        self.name_asked = false;
        self.input_enabled = true;
    }

    /// Renders the transcript for display.
    pub fn view(&self, policy: ScrollPolicy) -> View {
        render::render(&self.transcript, policy)
    }

    fn run_command(&mut self, command: ParsedCommand<'_>) {
        match command {
            ParsedCommand::Name("") => {
                self.transcript
                    .append_assistant("Tell me your name like this: /name Alex");
            }
            ParsedCommand::Name(name) => {
                self.name_asked = true;
                let reply = if let Some(known) = self.profile.name() {
                    format!("I already know you as {known}.")
                } else {
                    self.profile.set_name(name);
                    format!("Nice to meet you, {name}! What are you shopping for today?")
                };
                self.transcript.append_assistant(reply);
            }
            ParsedCommand::Help => {
                self.transcript.append_assistant(commands::help_text());
            }
            ParsedCommand::Reset => {
                tracing::info!("conversation reset");
                self.reset();
            }
        }
    }
}
