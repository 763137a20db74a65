pub mod summary;

pub use summary::{GenerateSummariesRequest, StorySelection, StorySummary, SummariesResponse};
