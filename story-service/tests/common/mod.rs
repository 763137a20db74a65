#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use service_core::config::Config as CoreConfig;
use story_service::config::{
    GeneratorBackend, GeneratorConfig, PromptConfig, ServiceConfig, StoryConfig,
};

pub fn test_config() -> StoryConfig {
    StoryConfig {
        common: CoreConfig { port: 0 },
        service: ServiceConfig {
            name: "story-service".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: String::new(),
        },
        generator: GeneratorConfig {
            backend: GeneratorBackend::Mock,
            endpoint: "http://localhost:0".to_string(),
            model: "gpt2".to_string(),
            api_token: None,
            max_length: 150,
            num_return_sequences: 3,
            timeout_secs: 5,
        },
        prompts: PromptConfig { seed: Some(2024) },
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
