//! Router-level tests for `POST /generate_summaries` using mock generators.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, test_config};
use serde_json::json;
use std::sync::Arc;
use story_service::services::providers::mock::MockGenerator;
use story_service::startup::{build_router, AppState};
use tower::ServiceExt;

fn app() -> axum::Router {
    let state = AppState::from_config(test_config()).expect("Failed to build state");
    build_router(state)
}

fn app_with(generator: MockGenerator) -> axum::Router {
    build_router(AppState::with_generator(test_config(), Arc::new(generator)))
}

#[tokio::test]
async fn single_genre_returns_two_labelled_summaries() {
    let response = app()
        .oneshot(post_json(
            "/generate_summaries",
            json!({ "selectedStoryTypes": ["Fantasy"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    for s in summaries {
        assert_eq!(s["type"], "Fantasy");
        let text = s["summary"].as_str().unwrap();
        assert!(text.ends_with("..."));
        let fragments = text.strip_suffix("...").unwrap().split(". ").count();
        assert!(fragments <= 4);
    }
}

#[tokio::test]
async fn multiple_genres_use_joined_label() {
    let response = app()
        .oneshot(post_json(
            "/generate_summaries",
            json!({ "selectedStoryTypes": ["Fantasy", "Horror"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let summaries = body["summaries"].as_array().unwrap();
    assert!(!summaries.is_empty());
    assert!(summaries.iter().all(|s| s["type"] == "Fantasy, Horror"));
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let response = app()
        .oneshot(post_json(
            "/generate_summaries",
            json!({ "selectedStoryTypes": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "No story type selected" })
    );
}

#[tokio::test]
async fn missing_selection_key_is_rejected() {
    let response = app()
        .oneshot(post_json("/generate_summaries", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "No story type selected" })
    );
}

#[tokio::test]
async fn summaries_truncate_generated_text() {
    let generator = MockGenerator::with_candidates([
        "One. Two. Three. Four. Five. Six.",
        "Alpha. Beta.",
        "Unused third candidate.",
    ]);

    let response = app_with(generator)
        .oneshot(post_json(
            "/generate_summaries",
            json!({ "selectedStoryTypes": ["Mystery"] }),
        ))
        .await
        .unwrap();

    assert_eq!(
        body_json(response).await,
        json!({
            "summaries": [
                { "type": "Mystery", "summary": "One. Two. Three. Four..." },
                { "type": "Mystery", "summary": "Alpha. Beta...." }
            ]
        })
    );
}

#[tokio::test]
async fn single_candidate_is_reused_for_second_summary() {
    let generator = MockGenerator::with_candidates(["Lonely tale. Ends here"]);

    let response = app_with(generator)
        .oneshot(post_json(
            "/generate_summaries",
            json!({ "selectedStoryTypes": ["Cartoon"] }),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0], summaries[1]);
    assert_eq!(summaries[0]["summary"], "Lonely tale. Ends here...");
}

#[tokio::test]
async fn generator_failure_is_server_error() {
    let response = app_with(MockGenerator::new(false))
        .oneshot(post_json(
            "/generate_summaries",
            json!({ "selectedStoryTypes": ["Comedy"] }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_server_error());
    let body = body_json(response).await;
    assert!(body.get("summaries").is_none());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/generate_summaries")
        .header("origin", "https://stories.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let mut request = post_json(
        "/generate_summaries",
        json!({ "selectedStoryTypes": ["Thriller"] }),
    );
    request
        .headers_mut()
        .insert("x-request-id", "story-req-1".parse().unwrap());

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "story-req-1");
}
