//! One-shot question handler.

use advisor_core::chat::{ChatSession, SkipNamePrompt, Submission, TurnOutcome};
use advisor_core::config::Config;
use advisor_core::format::{format_message, to_plain_text};
use advisor_core::providers::OpenAIChatClient;
use anyhow::{Context, Result, bail};

pub async fn run(prompt: &str, name: Option<&str>, config: &Config) -> Result<()> {
    let mut session = ChatSession::new(config.session_options()?);
    if let Some(name) = name {
        session.set_name(name);
    }

    match session.submit(prompt, &mut SkipNamePrompt).await {
        Submission::Ignored => bail!("Prompt is empty"),
        Submission::Handled => {}
        Submission::Pending => {
            let client = OpenAIChatClient::new(config.openai_config()?)?;
            tracing::info!(model = client.model(), "one-shot question");
            if let TurnOutcome::Failed(e) = session.complete(&client).await {
                return Err(anyhow::Error::new(e)).context("ask advisor");
            }
        }
    }

    if let Some(reply) = session.transcript().entries().last() {
        println!("{}", to_plain_text(&format_message(&reply.content)));
    }
    Ok(())
}
