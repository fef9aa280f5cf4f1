//! Interactive chat handler.

use std::io;
use std::path::PathBuf;

use advisor_core::chat::ChatSession;
use advisor_core::config::Config;
use advisor_core::providers::OpenAIChatClient;
use advisor_core::store::SessionStore;
use anyhow::{Context, Result};

use crate::modes::chat::{ReplOptions, run_chat};

#[derive(Debug, Clone, Default)]
pub struct ChatRunOptions {
    pub html: Option<PathBuf>,
    pub resume: bool,
    pub no_save: bool,
}

pub async fn run(options: &ChatRunOptions, config: &Config) -> Result<()> {
    let client = OpenAIChatClient::new(config.openai_config()?)?;
    let session_options = config.session_options()?;
    let store = SessionStore::default_location();

    let session = if options.resume {
        match store.load().context("load saved session")? {
            Some(saved) => ChatSession::restore(session_options, saved.entries, saved.profile),
            None => ChatSession::new(session_options),
        }
    } else {
        ChatSession::new(session_options)
    };

    let repl = ReplOptions {
        html: options.html.clone(),
        store: (!options.no_save).then_some(store),
        scroll_margin: config.scroll_margin,
    };

    tracing::info!(model = client.model(), resume = options.resume, "starting chat");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_chat(stdin.lock(), &mut stdout, &client, session, &repl).await
}

