mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_script_prompt, REPLY_FORMAT, SCRIPT_SYSTEM_PROMPT};

use async_trait::async_trait;
use serde_json::Value;
use std::error::Error;

/// Text returned by a provider, with its token accounting when reported
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    pub usage: Option<Value>,
}

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send one prompt and return the generated text
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>>;
}
