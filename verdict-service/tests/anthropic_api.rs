//! Pipeline tests against a mocked Anthropic HTTP endpoint, covering
//! the wire-level failure modes the in-process mock provider cannot.

use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;
use verdict_service::config::{AnthropicSettings, UploadSettings, VerdictConfig};
use verdict_service::services::providers::CompletionProvider;
use verdict_service::services::providers::anthropic::{AnthropicConfig, AnthropicProvider};
use verdict_service::startup::{AppState, build_router};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_against(server_url: &str) -> axum::Router {
    let provider: Arc<dyn CompletionProvider> = Arc::new(AnthropicProvider::new(AnthropicConfig {
        api_key: "test-key".to_string(),
        base_url: server_url.to_string(),
    }));
    build_router(AppState {
        config: VerdictConfig {
            common: Config {
                port: 0,
                log_level: "info".to_string(),
            },
            anthropic: AnthropicSettings {
                api_key: "test-key".to_string(),
                base_url: server_url.to_string(),
                analyze_model: "analyze-model".to_string(),
                verdict_model: "verdict-model".to_string(),
            },
            uploads: UploadSettings {
                max_image_bytes: 10 * 1024 * 1024,
            },
        },
        provider,
    })
}

fn verdict_request() -> Request<Body> {
    let questions: Vec<_> = (0..5)
        .map(|i| json!({"q": format!("Question {i}?")}))
        .collect();
    let body = json!({
        "subject": "fix a leaky faucet",
        "questions": questions,
        "answers": ["Yes", "Yes", "No", "Yes", "Yes"],
    });
    Request::builder()
        .method("POST")
        .uri("/api/handyman/verdict")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn fenced_completion_round_trips_through_the_wire() {
    let server = MockServer::start().await;

    let completion = json!({
        "verdict": "PRO",
        "headline": "Put the wrench down.",
        "reasoning": "Two noes on the questions that matter for this one.",
        "cost": "$250-$500 depending on your market",
        "resources": "",
        "final_word": "Call someone. Watch them work. Learn.",
    });
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": format!("```json\n{completion}\n```")}],
        })))
        .mount(&server)
        .await;

    let response = app_against(&server.uri())
        .oneshot(verdict_request())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["verdict"], "PRO");
}

#[tokio::test]
async fn error_object_in_success_body_surfaces_upstream_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"type": "rate_limit_error", "message": "rate limited"},
        })))
        .mount(&server)
        .await;

    let response = app_against(&server.uri())
        .oneshot(verdict_request())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "rate limited");
}

#[tokio::test]
async fn non_success_status_surfaces_embedded_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(json!({
            "error": {"type": "overloaded_error", "message": "Overloaded"},
        })))
        .mount(&server)
        .await;

    let response = app_against(&server.uri())
        .oneshot(verdict_request())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("Overloaded"), "got: {message}");
}
