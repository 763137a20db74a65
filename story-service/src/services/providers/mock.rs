//! Mock provider implementation for testing and local development.

use super::{GenerationParams, ProviderError, TextGenerator};
use async_trait::async_trait;

/// Mock text generator.
///
/// With no canned candidates it continues the prompt deterministically,
/// one candidate per requested sequence.
pub struct MockGenerator {
    enabled: bool,
    canned: Option<Vec<String>>,
}

impl MockGenerator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            canned: None,
        }
    }

    /// Always return exactly these candidates, regardless of the prompt.
    pub fn with_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: true,
            canned: Some(candidates.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
        _request_id: Option<&str>,
    ) -> Result<Vec<String>, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock generator not enabled".to_string(),
            ));
        }

        if let Some(canned) = &self.canned {
            return Ok(canned.clone());
        }

        Ok((1..=params.num_return_sequences)
            .map(|n| {
                format!(
                    "{} The hero set out at dawn. Candidate {} took an unexpected turn. \
                     Nobody was ready for what came next. The end was only the beginning.",
                    prompt, n
                )
            })
            .collect())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock generator not enabled".to_string(),
            ))
        }
    }
}
