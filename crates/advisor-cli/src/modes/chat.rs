//! Line-oriented chat REPL.
//!
//! Each new entry prints as `Label> text`. Markup is reduced to plain text for
//! the terminal; the HTML snapshot (when enabled) keeps it.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use advisor_core::chat::{ChatSession, NamePrompt, Submission, TurnOutcome};
use advisor_core::format::to_plain_text;
use advisor_core::providers::AssistantBackend;
use advisor_core::render::page::write_html_document;
use advisor_core::render::{RenderedBlock, ScrollPolicy};
use advisor_core::store::SessionStore;
use anyhow::Result;

const QUIT_COMMAND: &str = ":q";
const PROMPT_PREFIX: &str = "you> ";
const NAME_QUESTION: &str = "Before we start, what's your name? (press Enter to skip) ";

pub struct ReplOptions {
    pub html: Option<PathBuf>,
    pub store: Option<SessionStore>,
    pub scroll_margin: usize,
}

/// Answers the name prompt with the next input line.
struct LinePrompt<'a, I, W> {
    lines: &'a mut I,
    output: &'a mut W,
}

impl<I, W> NamePrompt for LinePrompt<'_, I, W>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    async fn ask_name(&mut self) -> Option<String> {
        if write!(self.output, "{NAME_QUESTION}")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return None;
        }

        let line = self.lines.next()?.ok()?;
        let name = line.trim();
        (!name.is_empty() && name != QUIT_COMMAND).then(|| name.to_string())
    }
}

/// Runs the chat loop until `:q` or end of input.
pub async fn run_chat<R, W, B>(
    input: R,
    output: &mut W,
    backend: &B,
    mut session: ChatSession,
    options: &ReplOptions,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    B: AssistantBackend,
{
    let view = session.view(ScrollPolicy::ShowLatest);
    for block in &view.blocks {
        print_block(output, block)?;
    }
    snapshot(output, &session, ScrollPolicy::ShowLatest, options)?;

    write!(output, "{PROMPT_PREFIX}")?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line?;

        if line.trim() == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        let mut prompt = LinePrompt {
            lines: &mut lines,
            output: &mut *output,
        };
        match session.submit(&line, &mut prompt).await {
            Submission::Ignored => {}
            Submission::Handled => {
                print_latest(output, &session, ScrollPolicy::ShowLatest)?;
                snapshot(output, &session, ScrollPolicy::ShowLatest, options)?;
                save(output, &session, options)?;
            }
            Submission::Pending => {
                print_latest(output, &session, ScrollPolicy::ShowLatest)?;
                snapshot(output, &session, ScrollPolicy::ShowLatest, options)?;

                if let TurnOutcome::Failed(e) = session.complete(backend).await {
                    tracing::debug!(details = ?e.details, "turn failed");
                }

                let aligned = ScrollPolicy::AlignLastUser {
                    margin: options.scroll_margin,
                };
                print_latest(output, &session, aligned)?;
                snapshot(output, &session, aligned, options)?;
                save(output, &session, options)?;
            }
        }

        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    Ok(())
}

fn print_block<W: Write>(output: &mut W, block: &RenderedBlock) -> io::Result<()> {
    let text = to_plain_text(&block.body);
    match block.label {
        Some(label) => writeln!(output, "{label}> {text}"),
        None => writeln!(output, "{text}"),
    }
}

fn print_latest<W: Write>(
    output: &mut W,
    session: &ChatSession,
    policy: ScrollPolicy,
) -> io::Result<()> {
    match session.view(policy).blocks.last() {
        Some(block) => print_block(output, block),
        None => Ok(()),
    }
}

fn snapshot<W: Write>(
    output: &mut W,
    session: &ChatSession,
    policy: ScrollPolicy,
    options: &ReplOptions,
) -> io::Result<()> {
    if let Some(path) = &options.html
        && let Err(e) = write_html_document(path, &session.view(policy))
    {
        writeln!(output, "Warning: {e:#}")?;
    }
    Ok(())
}

fn save<W: Write>(output: &mut W, session: &ChatSession, options: &ReplOptions) -> io::Result<()> {
    if let Some(store) = &options.store
        && let Err(e) = store.save(session)
    {
        writeln!(output, "Warning: Failed to save session: {e:#}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use advisor_core::chat::SessionOptions;
    use advisor_core::providers::{ChatMessage, ProviderError, ProviderResult};
    use tempfile::tempdir;

    use super::*;

    struct ScriptedBackend {
        replies: RefCell<Vec<ProviderResult<Option<String>>>>,
        requests: RefCell<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedBackend {
        fn new(mut replies: Vec<ProviderResult<Option<String>>>) -> Self {
            replies.reverse();
            Self {
                replies: RefCell::new(replies),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl AssistantBackend for ScriptedBackend {
        async fn complete(&self, messages: &[ChatMessage]) -> ProviderResult<Option<String>> {
            self.requests.borrow_mut().push(messages.to_vec());
            self.replies.borrow_mut().pop().unwrap_or(Ok(None))
        }
    }

    fn session() -> ChatSession {
        ChatSession::new(SessionOptions {
            greeting: "Welcome to the shop!".to_string(),
            placeholder: "Typing...".to_string(),
            persona_prompt: "You are an advisor.".to_string(),
        })
    }

    fn no_side_effects() -> ReplOptions {
        ReplOptions {
            html: None,
            store: None,
            scroll_margin: 12,
        }
    }

    async fn run(input: &str, backend: &ScriptedBackend, options: &ReplOptions) -> String {
        let mut output = Vec::new();
        run_chat(Cursor::new(input.to_string()), &mut output, backend, session(), options)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_greeting_then_quit() {
        let backend = ScriptedBackend::new(Vec::new());
        let out = run(":q\n", &backend, &no_side_effects()).await;

        assert!(out.starts_with("Welcome to the shop!\n"));
        assert!(out.contains("Goodbye!"));
        assert!(backend.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_turn_with_name_prompt() {
        let backend = ScriptedBackend::new(vec![Ok(Some("Hi **Dana**, try the *Trail 2*.".into()))]);
        let out = run("hiking boots?\nDana\n:q\n", &backend, &no_side_effects()).await;

        assert!(out.contains(NAME_QUESTION));
        assert!(out.contains("Advisor> Typing..."));
        assert!(out.contains("Advisor> Hi Dana, try the Trail 2."));

        let requests = backend.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0][1].content.contains("Dana"));
        assert_eq!(requests[0].last(), Some(&ChatMessage::user("hiking boots?")));
    }

    #[tokio::test]
    async fn test_failed_turn_prints_error_and_continues() {
        let backend = ScriptedBackend::new(vec![
            Err(ProviderError::http_status(503, "")),
            Ok(Some("Back online.".into())),
        ]);
        let out = run("/name Sam\nfirst\nsecond\n:q\n", &backend, &no_side_effects()).await;

        assert!(out.contains("Nice to meet you, Sam!"));
        assert!(out.contains("HTTP 503"));
        assert!(out.contains("Advisor> Back online."));
        assert!(!out.contains(NAME_QUESTION));
    }

    #[tokio::test]
    async fn test_help_does_not_call_backend() {
        let backend = ScriptedBackend::new(Vec::new());
        let out = run("/help\n:q\n", &backend, &no_side_effects()).await;

        assert!(out.contains("/name <your name>"));
        assert!(backend.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_writes_snapshot_and_saves() {
        let dir = tempdir().unwrap();
        let html = dir.path().join("chat.html");
        let store = SessionStore::new(dir.path().join("session.json"));
        let options = ReplOptions {
            html: Some(html.clone()),
            store: Some(store.clone()),
            scroll_margin: 20,
        };
        let backend = ScriptedBackend::new(vec![Ok(Some("# Picks\n- Trail 2".into()))]);

        run("\nboots\n\n:q\n", &backend, &options).await;

        let page = std::fs::read_to_string(&html).unwrap();
        assert!(page.contains("<h1>Picks</h1><ul><li>Trail 2</li></ul>"));
        assert!(page.contains(r#"data-scroll-margin="20""#));

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.entries.len(), 2);
        assert!(!saved.entries.iter().any(|e| e.is_placeholder()));
    }
}
