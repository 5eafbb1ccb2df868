use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;
use verdict_service::config::{AnthropicSettings, UploadSettings, VerdictConfig};
use verdict_service::services::providers::ProviderError;
use verdict_service::services::providers::mock::MockProvider;
use verdict_service::startup::{AppState, build_router};

fn test_config() -> VerdictConfig {
    VerdictConfig {
        common: Config {
            port: 0,
            log_level: "info".to_string(),
        },
        anthropic: AnthropicSettings {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:0".to_string(),
            analyze_model: "analyze-model".to_string(),
            verdict_model: "verdict-model".to_string(),
        },
        uploads: UploadSettings {
            max_image_bytes: 10 * 1024 * 1024,
        },
    }
}

fn app_with(mock: Arc<MockProvider>) -> axum::Router {
    build_router(AppState {
        config: test_config(),
        provider: mock,
    })
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn handyman_request(answer_count: usize) -> Value {
    let questions: Vec<_> = (0..5)
        .map(|i| json!({"q": format!("Question {i}?")}))
        .collect();
    json!({
        "subject": "fix a leaky faucet",
        "questions": questions,
        "answers": vec!["Yes"; answer_count],
    })
}

fn diy_verdict_json() -> String {
    json!({
        "verdict": "DIY",
        "headline": "You've got this one.",
        "reasoning": "Five yeses and you own the wrench. Go.",
        "positives": ["owns the tools", "done it before"],
        "negatives": [],
        "cost": "$150-$300 depending on your market",
        "resources": "This Old House on YouTube, r/Plumbing",
        "final_word": "Shut the water off first. I mean it.",
    })
    .to_string()
}

#[tokio::test]
async fn verdict_happy_path_relays_parsed_result() {
    let mock = Arc::new(MockProvider::returning(&diy_verdict_json()));
    let app = app_with(mock.clone());

    let response = app
        .oneshot(json_request("/api/handyman/verdict", handyman_request(5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["verdict"], "DIY");
    assert_eq!(json["data"]["headline"], "You've got this one.");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "verdict-model");
}

#[tokio::test]
async fn answer_count_mismatch_is_rejected_without_a_model_call() {
    let mock = Arc::new(MockProvider::returning("unused"));
    let app = app_with(mock.clone());

    let response = app
        .oneshot(json_request("/api/handyman/verdict", handyman_request(4)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn missing_subject_is_rejected() {
    let mock = Arc::new(MockProvider::returning("unused"));
    let app = app_with(mock.clone());

    let mut body = handyman_request(5);
    body.as_object_mut().unwrap().remove("subject");

    let response = app
        .oneshot(json_request("/api/handyman/verdict", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn out_of_set_verdict_label_is_a_parse_failure() {
    let raw = json!({
        "verdict": "MAYBE",
        "headline": "h",
        "reasoning": "r",
        "final_word": "f",
    })
    .to_string();
    let mock = Arc::new(MockProvider::returning(&raw));
    let app = app_with(mock);

    let response = app
        .oneshot(json_request("/api/handyman/verdict", handyman_request(5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    // raw completion stays in the logs, not in the envelope
    assert_eq!(json["error"], "Failed to parse model response");
}

#[tokio::test]
async fn provider_failure_surfaces_upstream_message() {
    let mock = Arc::new(MockProvider::failing(ProviderError::Api(
        "rate limited".to_string(),
    )));
    let app = app_with(mock);

    let response = app
        .oneshot(json_request("/api/handyman/verdict", handyman_request(5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "rate limited");
}

#[tokio::test]
async fn wingman_flow_accepts_scale_verdicts() {
    let raw = json!({
        "verdict": "PROMISING",
        "headline": "Stop drafting, start asking.",
        "reasoning": "They initiate half the time and plans actually happen.",
        "positives": ["initiates contact", "plans stick"],
        "negatives": ["slow replies on weekends"],
        "final_word": "Ask them Thursday.",
    })
    .to_string();
    let mock = Arc::new(MockProvider::returning(&raw));
    let app = app_with(mock);

    let questions: Vec<_> = (0..5)
        .map(|i| json!({"q": format!("Q{i}?"), "options": ["a", "b", "c", "d"]}))
        .collect();
    let body = json!({
        "subject": "we've been texting for a month",
        "questions": questions,
        "answers": ["a", "b", "a", "d", "c"],
    });

    let response = app
        .oneshot(json_request("/api/wingman/verdict", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["verdict"], "PROMISING");
    assert_eq!(json["data"]["positives"][0], "initiates contact");
}
