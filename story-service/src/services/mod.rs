pub mod error;
pub mod extractor;
pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod summaries;

pub use error::StoryError;
pub use summaries::StoryService;
