//! story-service: genre selections in, generated story teasers out.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
