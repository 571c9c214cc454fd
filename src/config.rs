use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used for script generation when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Where video templates are read from
    #[serde(default)]
    pub airtable: AirtableConfig,
    /// HTTP surface settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Record-source request timeout in seconds; unset leaves the
    /// transport default in place
    pub timeout: Option<u64>,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "claude-3-5-sonnet-20241022")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Settings used when a provider has no entry in the configuration;
    /// the API key then comes from the provider's environment variable.
    pub fn for_provider(provider_name: &str) -> Self {
        let model = match provider_name {
            "openai" => "gpt-4o-mini",
            _ => "claude-3-5-sonnet-20241022",
        };
        ProviderConfig {
            enabled: true,
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Tabular data source holding the video templates
#[derive(Debug, Deserialize, Clone)]
pub struct AirtableConfig {
    /// Personal access token (falls back to AIRTABLE_API_KEY)
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_id: String,
    #[serde(default)]
    pub table: String,
    #[serde(default = "default_airtable_url")]
    pub base_url: String,
    /// Records per page; Airtable caps this at 100
    pub page_size: Option<u32>,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_id: String::new(),
            table: String::new(),
            base_url: default_airtable_url(),
            page_size: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "anthropic".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_airtable_url() -> String {
    "https://api.airtable.com".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with REELSCRIPT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: REELSCRIPT__PROVIDERS__ANTHROPIC__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the layering rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: REELSCRIPT__AIRTABLE__BASE_ID
        .add_source(
            Environment::with_prefix("REELSCRIPT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "anthropic");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_max_tokens(), 2000);
        assert_eq!(default_bind(), "127.0.0.1:8080");
    }

    #[test]
    fn test_airtable_config_default() {
        let airtable = AirtableConfig::default();
        assert!(airtable.api_key.is_none());
        assert_eq!(airtable.base_url, "https://api.airtable.com");
        assert!(airtable.page_size.is_none());
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.default_provider, "anthropic");
        assert!(config.providers.is_empty());
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_toml_structure() {
        let toml = r#"
            default_provider = "openai"
            timeout = 10

            [providers.openai]
            enabled = true
            model = "gpt-4o-mini"

            [providers.anthropic]
            enabled = false
            model = "claude-3-5-sonnet-20241022"
            max_tokens = 4000

            [airtable]
            base_id = "appExample"
            table = "tblExample"
            page_size = 50
        "#;

        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers["openai"].temperature, 0.7);
        assert_eq!(config.providers["anthropic"].max_tokens, 4000);
        assert!(!config.providers["anthropic"].enabled);
        assert_eq!(config.airtable.base_id, "appExample");
        assert_eq!(config.airtable.page_size, Some(50));
        assert_eq!(config.airtable.base_url, "https://api.airtable.com");
    }
}
