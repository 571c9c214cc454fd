use log::info;
use serde_json::Value;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::editor::ScriptEditor;
use crate::model::{Brand, CustomRequirements, Video, DEFAULT_DURATION, DEFAULT_VOICE_TONE};
use crate::providers::{build_script_prompt, LlmProvider, ProviderFactory, SCRIPT_SYSTEM_PROMPT};
use crate::sections::ScriptSections;
use crate::ReelError;

/// A generated script, already split into sections
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedScript {
    /// The generator's reply, verbatim
    pub content: String,
    pub sections: ScriptSections,
    pub usage: Option<Value>,
    pub provider: String,
}

impl GeneratedScript {
    /// Open the script for section editing.
    pub fn into_editor(self, video: Option<&Video>) -> ScriptEditor {
        ScriptEditor::from_generated(self.content, video)
    }
}

/// Checks the customization before anything leaves the process.
pub fn validate_requirements(requirements: &CustomRequirements) -> Result<(), ReelError> {
    if requirements.brand.trim().is_empty() || requirements.target_audience.trim().is_empty() {
        return Err(ReelError::ValidationError(
            "Please fill in brand name and target audience.".to_string(),
        ));
    }
    Ok(())
}

/// Prompt the provider with the template video and brand customization,
/// then sectionize the reply.
pub async fn generate_script(
    provider: &dyn LlmProvider,
    video: &Video,
    requirements: &CustomRequirements,
) -> Result<GeneratedScript, ReelError> {
    validate_requirements(requirements)?;

    info!("Generating script for video: {}", video.title);
    let prompt = build_script_prompt(video, requirements);

    let generation = provider
        .generate(SCRIPT_SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| ReelError::GenerationError(e.to_string()))?;
    info!(
        "Script generated successfully using {}",
        provider.provider_name()
    );

    Ok(GeneratedScript {
        sections: ScriptSections::parse(&generation.text),
        content: generation.text,
        usage: generation.usage,
        provider: provider.provider_name().to_string(),
    })
}

/// Builder for configuring and running one script generation
#[derive(Default)]
pub struct ScriptRequestBuilder {
    video: Option<Video>,
    requirements: CustomRequirements,
    provider: Option<Arc<dyn LlmProvider>>,
    provider_name: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
}

impl ScriptRequestBuilder {
    /// Set the viral video the script is modelled on
    pub fn video(mut self, video: Video) -> Self {
        self.video = Some(video);
        self
    }

    /// Replace the whole customization at once
    pub fn requirements(mut self, requirements: CustomRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn brand(mut self, name: impl Into<String>) -> Self {
        self.requirements.brand = name.into();
        self
    }

    pub fn brand_description(mut self, description: impl Into<String>) -> Self {
        self.requirements.brand_description = description.into();
        self
    }

    pub fn target_audience(mut self, audience: impl Into<String>) -> Self {
        self.requirements.target_audience = audience.into();
        self
    }

    pub fn call_to_action(mut self, cta: impl Into<String>) -> Self {
        self.requirements.call_to_action = cta.into();
        self
    }

    /// Duration bucket such as "15-30 seconds"
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.requirements.duration = duration.into();
        self
    }

    pub fn voice_tone(mut self, tone: impl Into<String>) -> Self {
        self.requirements.voice_tone = tone.into();
        self
    }

    pub fn additional_notes(mut self, notes: impl Into<String>) -> Self {
        self.requirements.additional_notes = notes.into();
        self
    }

    /// Prefill from a saved brand. Audience and call to action are only
    /// replaced when the brand has them.
    pub fn brand_profile(mut self, brand: &Brand) -> Self {
        self.requirements.brand = brand.name.clone();
        self.requirements.brand_description = brand.description.clone().unwrap_or_default();
        if let Some(audience) = &brand.target_audience {
            self.requirements.target_audience = audience.clone();
        }
        if let Some(cta) = &brand.call_to_action {
            self.requirements.call_to_action = cta.clone();
        }
        self
    }

    /// Use an already constructed provider instead of the configured one
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Pick a configured provider by name ("anthropic", "openai")
    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Set the API key for the LLM provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn resolve_provider(&self) -> Result<Arc<dyn LlmProvider>, ReelError> {
        if let Some(provider) = &self.provider {
            return Ok(Arc::clone(provider));
        }

        let config = AppConfig::load()?;
        let name = self
            .provider_name
            .clone()
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = ProviderFactory::provider_config(&config, &name);
        if let Some(key) = &self.api_key {
            provider_config.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            provider_config.model = model.clone();
        }

        ProviderFactory::create(&name, &provider_config)
            .map(Arc::from)
            .map_err(|e| ReelError::BuilderError(e.to_string()))
    }

    /// Validate, prompt the provider and sectionize the reply
    ///
    /// # Errors
    /// Returns `ReelError` if:
    /// - No video was specified
    /// - Brand name or target audience is missing (checked before any call)
    /// - The provider cannot be built or the generation call fails
    pub async fn generate(mut self) -> Result<GeneratedScript, ReelError> {
        let video = self.video.take().ok_or_else(|| {
            ReelError::BuilderError("No video specified. Use .video()".to_string())
        })?;

        if self.requirements.duration.trim().is_empty() {
            self.requirements.duration = DEFAULT_DURATION.to_string();
        }
        if self.requirements.voice_tone.trim().is_empty() {
            self.requirements.voice_tone = DEFAULT_VOICE_TONE.to_string();
        }
        validate_requirements(&self.requirements)?;

        let provider = self.resolve_provider()?;
        generate_script(provider.as_ref(), &video, &self.requirements).await
    }
}

/// Main entry point for the builder API
pub struct ScriptRequest;

impl ScriptRequest {
    /// Creates a new builder for generating a script
    ///
    /// # Example
    /// ```
    /// use reelscript::ScriptRequest;
    ///
    /// let builder = ScriptRequest::builder()
    ///     .brand("BrewCo")
    ///     .target_audience("Busy professionals aged 25-40");
    /// ```
    pub fn builder() -> ScriptRequestBuilder {
        ScriptRequestBuilder::default()
    }
}
