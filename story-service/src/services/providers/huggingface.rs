//! Hugging Face inference provider.
//!
//! Speaks the text-generation pipeline wire format of the Hugging Face
//! inference API (and compatible self-hosted servers):
//! `POST {endpoint}/models/{model}` with `inputs` + `parameters`, answered by
//! a list of `{"generated_text": ...}` objects.

use super::{GenerationParams, ProviderError, TextGenerator};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Hugging Face provider configuration.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

/// Text generator backed by a Hugging Face inference endpoint.
pub struct HuggingFaceGenerator {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceGenerator {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
        request_id: Option<&str>,
    ) -> Result<Vec<String>, ProviderError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_length: params.max_length,
                num_return_sequences: params.num_return_sequences,
                truncation: params.truncation,
                return_full_text: true,
                do_sample: true,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            num_return_sequences = params.num_return_sequences,
            "Sending request to inference API"
        );

        let traced = self
            .client
            .traced_post(&self.model_url())
            .maybe_bearer_auth(self.config.api_token.as_deref())
            .json(&request);

        let response = match request_id {
            Some(id) => traced.send_with_request_id(id).await,
            None => traced.send().await,
        }
        .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        decode_candidates(&body)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .traced_get(&self.model_url())
            .maybe_bearer_auth(self.config.api_token.as_deref())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<InferenceErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        StatusCode::SERVICE_UNAVAILABLE => ProviderError::Unavailable(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::NotConfigured(format!("Inference API rejected credentials: {}", message))
        }
        _ => ProviderError::ApiError(format!("Inference API error {}: {}", status, message)),
    }
}

/// Decode a pipeline response into candidate texts, preserving order.
fn decode_candidates(body: &str) -> Result<Vec<String>, ProviderError> {
    let parsed: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let candidates = match parsed {
        InferenceResponse::Flat(items) => items,
        InferenceResponse::Batched(batches) => batches.into_iter().flatten().collect(),
    };

    Ok(candidates.into_iter().map(|c| c.generated_text).collect())
}

// ============================================================================
// Inference API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    num_return_sequences: u32,
    truncation: bool,
    return_full_text: bool,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Flat(Vec<GeneratedText>),
    Batched(Vec<Vec<GeneratedText>>),
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}
