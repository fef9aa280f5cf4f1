//! Render command handler.

use std::io::Read;
use std::path::Path;

use advisor_core::format::{format_message, to_plain_text};
use anyhow::{Context, Result};

pub fn run(file: Option<&Path>, plain: bool) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            buf
        }
    };

    // A trailing newline from the file or pipe is not part of the message.
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let text = text.strip_suffix('\r').unwrap_or(text);

    let markup = format_message(text);
    if plain {
        println!("{}", to_plain_text(&markup));
    } else {
        println!("{markup}");
    }
    Ok(())
}
