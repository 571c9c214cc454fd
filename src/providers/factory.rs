use crate::config::{AppConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider};
use std::error::Error;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Settings for `provider_name`: its configured entry, or the
    /// built-in defaults when the configuration does not mention it
    pub fn provider_config(config: &AppConfig, provider_name: &str) -> ProviderConfig {
        config
            .providers
            .get(provider_name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::for_provider(provider_name))
    }

    /// Create a provider by name, falling back to built-in defaults
    pub fn from_app_config(
        config: &AppConfig,
        provider_name: &str,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        Self::create(provider_name, &Self::provider_config(config, provider_name))
    }

    /// Create the provider named by `default_provider`
    pub fn get_default_provider(
        config: &AppConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        Self::from_app_config(config, &config.default_provider)
    }
}
