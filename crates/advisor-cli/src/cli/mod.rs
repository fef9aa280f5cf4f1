//! CLI entry and dispatch.

use std::path::PathBuf;

use advisor_core::config::{self, paths};
use advisor_core::logging;
use anyhow::{Context, Result};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(version)]
#[command(about = "Chat with a retail product advisor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the model from config
    #[arg(long, global = true, env = "ADVISOR_MODEL")]
    model: Option<String>,

    /// Override the persona prompt from config
    #[arg(long, global = true)]
    persona: Option<String>,
}

/// Arguments for the interactive chat.
#[derive(clap::Args, Debug, Clone, Default)]
struct ChatArgs {
    /// Write an HTML snapshot of the conversation here after every update
    #[arg(long, value_name = "PATH")]
    html: Option<PathBuf>,

    /// Continue the saved conversation
    #[arg(long)]
    resume: bool,

    /// Do not save the conversation
    #[arg(long = "no-save")]
    no_save: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Start an interactive conversation (default)
    Chat(ChatArgs),

    /// Ask a single question and print the reply
    Ask {
        /// The question for the advisor
        #[arg(value_name = "PROMPT")]
        prompt: String,

        /// Introduce yourself by name
        #[arg(long)]
        name: Option<String>,
    },

    /// Format text (file or stdin) into chat markup
    Render {
        /// File to read (stdin when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Print the extracted plain text instead of markup
        #[arg(long)]
        plain: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage the saved conversation
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Save the default model to the config file
    SetModel {
        #[arg(value_name = "MODEL")]
        model: String,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Print the saved conversation
    Show,
    /// Delete the saved conversation
    Clear,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        model,
        persona,
    } = cli;
    let overrides = Overrides {
        model: model.as_deref(),
        persona: persona.as_deref(),
    };

    // default to chat mode
    let command = command.unwrap_or_else(|| Commands::Chat(ChatArgs::default()));

    match command {
        Commands::Chat(args) => {
            let config = overrides.load()?;
            commands::chat::run(&(&args).into(), &config).await
        }
        Commands::Ask { prompt, name } => {
            let config = overrides.load()?;
            commands::ask::run(&prompt, name.as_deref(), &config).await
        }
        Commands::Render { file, plain } => commands::render::run(file.as_deref(), plain),

        // Config commands must work even when the file does not parse.
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetModel { model } => commands::config::set_model(&model),
        },

        Commands::Session { command } => match command {
            SessionCommands::Show => commands::session::show(),
            SessionCommands::Clear => commands::session::clear(),
        },
    }
}

/// Global flags layered over the config file.
struct Overrides<'a> {
    model: Option<&'a str>,
    persona: Option<&'a str>,
}

impl Overrides<'_> {
    fn load(&self) -> Result<config::Config> {
        let mut config = config::Config::load().context("load config")?;

        if let Some(model) = self.model.map(str::trim).filter(|m| !m.is_empty()) {
            config.model = model.to_string();
        }
        if let Some(persona) = self.persona {
            let trimmed = persona.trim();
            config.persona_prompt_file = None;
            config.persona_prompt = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }

        Ok(config)
    }
}

impl From<&ChatArgs> for commands::chat::ChatRunOptions {
    fn from(args: &ChatArgs) -> Self {
        commands::chat::ChatRunOptions {
            html: args.html.clone(),
            resume: args.resume,
            no_save: args.no_save,
        }
    }
}
