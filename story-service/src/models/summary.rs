//! Request/response shapes for the summary endpoint.

use crate::services::error::StoryError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /generate_summaries`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateSummariesRequest {
    #[serde(rename = "selectedStoryTypes", default)]
    #[validate(required, length(min = 1))]
    pub selected_story_types: Option<Vec<String>>,
}

/// One generated teaser and the genre label it was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummary {
    #[serde(rename = "type")]
    pub story_type: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummariesResponse {
    pub summaries: Vec<StorySummary>,
}

/// A validated, non-empty genre selection in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorySelection {
    Single(String),
    Combined(Vec<String>),
}

impl StorySelection {
    pub fn from_labels(mut labels: Vec<String>) -> Result<Self, StoryError> {
        match labels.len() {
            0 => Err(StoryError::MissingSelection),
            1 => Ok(StorySelection::Single(labels.remove(0))),
            _ => Ok(StorySelection::Combined(labels)),
        }
    }

    /// Label attached to every summary produced for this selection.
    pub fn type_label(&self) -> String {
        match self {
            StorySelection::Single(story_type) => story_type.clone(),
            StorySelection::Combined(story_types) => story_types.join(", "),
        }
    }

    /// Metric label distinguishing single-genre from combined requests.
    pub fn mode(&self) -> &'static str {
        match self {
            StorySelection::Single(_) => "single",
            StorySelection::Combined(_) => "combined",
        }
    }
}

impl TryFrom<GenerateSummariesRequest> for StorySelection {
    type Error = StoryError;

    fn try_from(req: GenerateSummariesRequest) -> Result<Self, Self::Error> {
        req.validate().map_err(|_| StoryError::MissingSelection)?;
        StorySelection::from_labels(req.selected_story_types.unwrap_or_default())
    }
}
