use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Longest continuation, in tokens, requested from the generator.
const DEFAULT_MAX_LENGTH: u32 = 150;

/// Candidates requested per prompt; only the first two become summaries.
const DEFAULT_NUM_RETURN_SEQUENCES: u32 = 3;

/// Generation on a cold model can take a while.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub service: ServiceConfig,
    pub generator: GeneratorConfig,
    pub prompts: PromptConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
    /// Empty disables OTLP span export.
    pub otlp_endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub backend: GeneratorBackend,
    /// Base URL of the inference API, without the `/models/...` suffix.
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub max_length: u32,
    pub num_return_sequences: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    /// Fixed seed for prompt variant selection; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

/// Which text generator implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorBackend {
    HuggingFace,
    Mock,
}

impl std::str::FromStr for GeneratorBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(GeneratorBackend::HuggingFace),
            "mock" => Ok(GeneratorBackend::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "Unknown GENERATOR_BACKEND '{}', expected 'huggingface' or 'mock'",
                other
            ))),
        }
    }
}

impl StoryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(StoryConfig {
            common: common_config,
            service: ServiceConfig {
                name: get_env("SERVICE_NAME", Some("story-service"), is_prod)?,
                log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
                otlp_endpoint: get_env("OTLP_ENDPOINT", Some(""), is_prod)?,
            },
            generator: GeneratorConfig {
                backend: get_env("GENERATOR_BACKEND", Some("huggingface"), is_prod)?.parse()?,
                endpoint: get_env(
                    "GENERATOR_ENDPOINT",
                    Some("https://api-inference.huggingface.co"),
                    is_prod,
                )?,
                model: get_env("GENERATOR_MODEL", Some("gpt2"), is_prod)?,
                api_token: env::var("GENERATOR_API_TOKEN")
                    .ok()
                    .filter(|t| !t.is_empty()),
                max_length: parse_or(
                    &get_env(
                        "GENERATOR_MAX_LENGTH",
                        Some(&DEFAULT_MAX_LENGTH.to_string()),
                        is_prod,
                    )?,
                    DEFAULT_MAX_LENGTH,
                ),
                num_return_sequences: parse_or(
                    &get_env(
                        "GENERATOR_NUM_RETURN_SEQUENCES",
                        Some(&DEFAULT_NUM_RETURN_SEQUENCES.to_string()),
                        is_prod,
                    )?,
                    DEFAULT_NUM_RETURN_SEQUENCES,
                ),
                timeout_secs: parse_or(
                    &get_env(
                        "GENERATOR_TIMEOUT_SECS",
                        Some(&DEFAULT_TIMEOUT_SECS.to_string()),
                        is_prod,
                    )?,
                    DEFAULT_TIMEOUT_SECS,
                ),
            },
            prompts: PromptConfig {
                seed: env::var("STORY_PROMPT_SEED")
                    .ok()
                    .and_then(|s| s.trim().parse().ok()),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or(default)
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
