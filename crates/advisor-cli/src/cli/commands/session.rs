//! Saved conversation handlers.

use advisor_core::format::{format_message, to_plain_text};
use advisor_core::store::SessionStore;
use anyhow::{Context, Result};

pub fn show() -> Result<()> {
    let store = SessionStore::default_location();
    let Some(saved) = store.load().context("load saved session")? else {
        println!("No saved session.");
        return Ok(());
    };

    println!("Saved at {}", saved.saved_at);
    if let Some(name) = saved.profile.name() {
        println!("Name: {name}");
    }
    for entry in &saved.entries {
        println!(
            "{}> {}",
            entry.role.label(),
            to_plain_text(&format_message(&entry.content))
        );
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let store = SessionStore::default_location();
    if store.clear()? {
        println!("Cleared saved session at {}", store.path().display());
    } else {
        println!("No saved session.");
    }
    Ok(())
}
