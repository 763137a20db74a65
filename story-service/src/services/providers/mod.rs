//! Text generation provider abstractions and implementations.
//!
//! The story service treats the language model as an opaque collaborator:
//! a prompt goes in, candidate continuations come out. Backends are swapped
//! behind [`TextGenerator`] (Hugging Face inference, mock).

pub mod huggingface;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::InvalidResponse(_) => "invalid_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Generation parameters sent with every prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    /// Maximum total length of each sequence, in tokens.
    pub max_length: u32,

    /// Number of candidate continuations to request.
    pub num_return_sequences: u32,

    /// Truncate the prompt so the output respects `max_length`.
    pub truncation: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 150,
            num_return_sequences: 3,
            truncation: true,
        }
    }
}

/// Trait for text generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Generate candidate continuations for `prompt`, in backend order.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
        request_id: Option<&str>,
    ) -> Result<Vec<String>, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
