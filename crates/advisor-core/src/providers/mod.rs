//! Language-model backend used to answer the advisor's turns.

pub mod openai_chat;
pub mod shared;

pub use openai_chat::{OpenAIChatClient, OpenAIChatConfig};
pub use shared::{
    AssistantBackend, ChatMessage, ProviderError, ProviderErrorKind, ProviderResult,
    resolve_api_key, resolve_base_url,
};
