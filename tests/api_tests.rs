use ha_relay::config::{AiConfig, Config, HubConfig};
use ha_relay::message::ErrorBody;
use ha_relay::routes::create_router;
use ha_relay::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(ai_url: &str, hub_url: &str) -> Router {
    let config = Config {
        ai: AiConfig {
            base_url: ai_url.to_string(),
            api_key: "Bearer ai-key".to_string(),
        },
        hub: HubConfig {
            base_url: hub_url.to_string(),
            token: "hub-token".to_string(),
            ws_url: String::new(),
        },
    };
    create_router().with_state(Arc::new(AppState::new(&config)))
}

fn chat_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_returns_provider_json() {
    let ai = MockServer::start().await;
    let completion = json!({"choices": [{"message": {"content": "hi"}}]});

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer ai-key"))
        .and(body_json(json!({
            "model": "deepseek-ai/DeepSeek-R1",
            "messages": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion.clone()))
        .expect(1)
        .mount(&ai)
        .await;

    let app = app_for(&ai.uri(), "http://127.0.0.1:1");
    let response = app
        .oneshot(chat_request(r#"{"message":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, completion);
    // What the page renders.
    assert_eq!(body["choices"][0]["message"]["content"], "hi");
}

#[tokio::test]
async fn test_chat_upstream_failure_is_500() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&ai)
        .await;

    let app = app_for(&ai.uri(), "http://127.0.0.1:1");
    let response = app
        .oneshot(chat_request(r#"{"message":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(body.error, "AI API error");
}

#[tokio::test]
async fn test_chat_malformed_provider_body_is_500() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&ai)
        .await;

    let app = app_for(&ai.uri(), "http://127.0.0.1:1");
    let response = app
        .oneshot(chat_request(r#"{"message":"hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({"error": "AI API error"}));
}

#[tokio::test]
async fn test_chat_missing_message_is_forwarded() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "deepseek-ai/DeepSeek-R1",
            "messages": [{"role": "user"}]
        })))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&ai)
        .await;

    let app = app_for(&ai.uri(), "http://127.0.0.1:1");
    let response = app.oneshot(chat_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_same_message_twice_hits_provider_twice() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .expect(2)
        .mount(&ai)
        .await;

    let app = app_for(&ai.uri(), "http://127.0.0.1:1");
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(chat_request(r#"{"message":"same"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_states_returns_hub_json() {
    let hub = MockServer::start().await;
    let states = json!([
        {"entity_id": "light.kitchen", "state": "on"},
        {"entity_id": "sensor.door", "state": "closed"}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/states"))
        .and(header("authorization", "Bearer hub-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(states.clone()))
        .mount(&hub)
        .await;

    let app = app_for("http://127.0.0.1:1", &hub.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/states")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, states);
}

#[tokio::test]
async fn test_states_hub_failure_is_500() {
    let hub = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&hub)
        .await;

    let app = app_for("http://127.0.0.1:1", &hub.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/states")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Home Assistant API error"})
    );
}

#[tokio::test]
async fn test_root_serves_page() {
    let app = app_for("http://127.0.0.1:1", "http://127.0.0.1:1");
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("id=\"prompt\""));
}

#[tokio::test]
async fn test_static_assets_served() {
    let app = app_for("http://127.0.0.1:1", "http://127.0.0.1:1");
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/missing.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_unreadable_body_is_forwarded_empty() {
    let ai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "deepseek-ai/DeepSeek-R1",
            "messages": [{"role": "user"}]
        })))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&ai)
        .await;

    let app = app_for(&ai.uri(), "http://127.0.0.1:1");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({"error": "AI API error"}));
}
