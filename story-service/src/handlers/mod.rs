//! HTTP handlers for the story service.

pub mod health;
pub mod metrics;
pub mod summaries;
