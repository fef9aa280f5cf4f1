//! Configuration management for the advisor.
//!
//! Loads configuration from ${ADVISOR_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chat::SessionOptions;
use crate::prompts;
use crate::providers::OpenAIChatConfig;

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

pub mod paths {
    //! Path resolution for advisor configuration and data files.
    //!
    //! ADVISOR_HOME resolution order:
    //! 1. ADVISOR_HOME environment variable (if set)
    //! 2. ~/.config/advisor (default)
    //! 3. ./.advisor when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the advisor home directory.
    pub fn advisor_home() -> PathBuf {
        if let Ok(home) = std::env::var("ADVISOR_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".advisor"),
            |h| h.join(".config").join("advisor"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        advisor_home().join("config.toml")
    }

    /// Returns the path to the saved conversation.
    pub fn session_path() -> PathBuf {
        advisor_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        advisor_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model name sent to the backend
    pub model: String,

    /// Maximum tokens per reply (0 omits the field)
    pub max_tokens: u32,

    /// Optional inline persona instruction
    pub persona_prompt: Option<String>,

    /// Optional path to a file containing the persona instruction
    pub persona_prompt_file: Option<String>,

    /// Welcome message seeded into every new conversation
    pub greeting: String,

    /// Transient entry shown while a reply is pending
    pub placeholder: String,

    /// Gap kept above the latest question when aligning after a reply
    pub scroll_margin: usize,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    pub providers: ProvidersConfig,
}

impl Config {
    const DEFAULT_MODEL: &str = "gpt-4o-mini";
    const DEFAULT_MAX_TOKENS: u32 = 1024;
    const DEFAULT_SCROLL_MARGIN: usize = 12;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 60;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the model field to the config file.
    pub fn save_model(model: &str) -> Result<()> {
        Self::save_model_to(&paths::config_path(), model)
    }

    /// Saves only the model field to a specific config file path.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_model_to(path: &Path, model: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["model"] = value(model);

        Self::write_config(path, &doc.to_string())
    }

    /// Returns the persona instruction: file, then inline, then built-in.
    pub fn effective_persona_prompt(&self) -> Result<String> {
        if let Some(path_str) = &self.persona_prompt_file {
            let path = Path::new(path_str);
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read persona prompt file: {path_str}"))?;
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }

        if let Some(inline) = self.persona_prompt.as_deref().map(str::trim)
            && !inline.is_empty()
        {
            return Ok(inline.to_string());
        }

        Ok(prompts::DEFAULT_PERSONA_PROMPT.trim().to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Greeting, placeholder and persona for a new chat session.
    pub fn session_options(&self) -> Result<SessionOptions> {
        Ok(SessionOptions {
            greeting: self.greeting.clone(),
            placeholder: self.placeholder.clone(),
            persona_prompt: self.effective_persona_prompt()?,
        })
    }

    /// Backend settings with the environment applied.
    pub fn openai_config(&self) -> Result<OpenAIChatConfig> {
        let openai = &self.providers.openai;
        OpenAIChatConfig::from_env(
            self.model.clone(),
            (self.max_tokens > 0).then_some(self.max_tokens),
            openai.effective_base_url(),
            openai.effective_api_key(),
            self.request_timeout(),
        )
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Writes config content atomically (temp file + rename), creating parent
    /// directories as needed.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            persona_prompt: None,
            persona_prompt_file: None,
            greeting: prompts::DEFAULT_GREETING.to_string(),
            placeholder: prompts::DEFAULT_PLACEHOLDER.to_string(),
            scroll_margin: Self::DEFAULT_SCROLL_MARGIN,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            providers: ProvidersConfig::default(),
        }
    }
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Optional API key (overrides environment variable).
    pub api_key: Option<String>,
    /// Optional API base URL (for proxies).
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Returns the effective API key if set and non-empty.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns the effective base URL if set and non-empty.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
