use crate::config::ProviderConfig;
use crate::providers::{Generation, LlmProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or("ANTHROPIC_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Generation, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "system": system_prompt,
                "messages": [
                    {
                        "role": "user",
                        "content": user_prompt
                    }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Claude API error: {} - {}", status, body).into());
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let text = response_body["content"][0]["text"]
            .as_str()
            .ok_or("Failed to extract content from Anthropic response")?
            .to_string();

        Ok(Generation {
            text,
            usage: response_body.get("usage").cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn test_config() -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: Some("test-key".to_string()),
            base_url: None,
        }
    }

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "fake_api_key")
            .match_header("anthropic-version", "2023-06-01")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "content": [{ "type": "text", "text": "**HOOK:**\nWait for it" }],
                    "usage": { "input_tokens": 412, "output_tokens": 198 }
                }"#,
            )
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "claude-3-5-sonnet-20241022".to_string(),
        );

        let generation = provider.generate("system", "user").await.unwrap();
        assert_eq!(generation.text, "**HOOK:**\nWait for it");
        assert_eq!(generation.usage.unwrap()["output_tokens"], 198);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "error", "error": {"type": "authentication_error"}}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "bad_key".to_string(),
            server.url(),
            "claude-3-5-sonnet-20241022".to_string(),
        );

        let result = provider.generate("system", "user").await;
        assert!(result.unwrap_err().to_string().contains("401"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_unexpected_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": []}"#)
            .create_async()
            .await;

        let provider = AnthropicProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "claude-3-5-sonnet-20241022".to_string(),
        );

        assert!(provider.generate("system", "user").await.is_err());
    }

    #[test]
    fn test_provider_from_config() {
        let provider = AnthropicProvider::new(&test_config()).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }
}
