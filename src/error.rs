use thiserror::Error;

/// Errors that can occur while fetching templates, generating scripts or
/// persisting user content
#[derive(Error, Debug)]
pub enum ReelError {
    /// Transport failure talking to a third-party API
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The record source answered, but not with usable records
    #[error("Record source error: {0}")]
    SourceError(String),

    /// The text-generation call failed or its reply was unreadable
    #[error("Script generation failed: {0}")]
    GenerationError(String),

    /// Required input was missing before any network call was made
    #[error("Missing information: {0}")]
    ValidationError(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// An operation needed a signed-in user
    #[error("Authentication required")]
    Unauthenticated,

    /// The entity does not exist or belongs to someone else
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence backend error
    #[error("Store error: {0}")]
    StoreError(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ReelError {
    /// Whether the failure was caught before reaching any collaborator.
    pub fn is_validation(&self) -> bool {
        matches!(self, ReelError::ValidationError(_))
    }
}
