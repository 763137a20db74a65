use super::providers::ProviderError;
use service_core::error::AppError;
use thiserror::Error;

/// Message returned when a request selects no story types.
pub const MISSING_SELECTION_MESSAGE: &str = "No story type selected";

#[derive(Error, Debug)]
pub enum StoryError {
    #[error("{}", MISSING_SELECTION_MESSAGE)]
    MissingSelection,

    #[error("Generator returned no candidates")]
    EmptyGeneration,

    #[error("Generation failed: {0}")]
    Generation(#[from] ProviderError),
}

impl From<StoryError> for AppError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::MissingSelection => {
                AppError::BadRequest(anyhow::anyhow!(MISSING_SELECTION_MESSAGE))
            }
            StoryError::EmptyGeneration => {
                AppError::InternalError(anyhow::anyhow!("Generator returned no candidates"))
            }
            StoryError::Generation(ProviderError::RateLimited) => AppError::TooManyRequests(
                "Story generator is rate limited, try again later".to_string(),
                None,
            ),
            StoryError::Generation(e) => AppError::BadGateway(e.to_string()),
        }
    }
}
