//! Config command handlers.

use advisor_core::config;
use anyhow::{Context, Result};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn set_model(model: &str) -> Result<()> {
    let model = model.trim();
    if model.is_empty() {
        anyhow::bail!("Model name cannot be empty");
    }

    let config_path = config::paths::config_path();
    config::Config::save_model_to(&config_path, model)
        .with_context(|| format!("save model to {}", config_path.display()))?;
    println!("Model set to {model} in {}", config_path.display());
    Ok(())
}
