//! Core advisor library (formatting, transcript, rendering, providers, config).

pub mod chat;
pub mod config;
pub mod format;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod store;
