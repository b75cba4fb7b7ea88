//! Shared test utilities

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use tokio::sync::Mutex;
use tower::ServiceExt;

use kiosk_gateway::api::{self, ApiState};
use kiosk_gateway::dialogue::{Dispatcher, SessionRegistry};

/// Build a test router without speech collaborators
#[must_use]
pub fn test_router() -> Router {
    router_with_limits(Duration::from_secs(600), 40)
}

/// Build a test router with custom session limits
#[must_use]
pub fn router_with_limits(ttl: Duration, max_turns: u32) -> Router {
    let state = Arc::new(ApiState {
        registry: Arc::new(Mutex::new(SessionRegistry::new(ttl, max_turns))),
        dispatcher: Arc::new(Dispatcher::new()),
        stt: None,
        tts: None,
    });
    api::router(state)
}

/// POST a JSON body and decode the JSON answer
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    decode(response).await
}

/// GET and decode the JSON answer
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    decode(response).await
}

async fn decode(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send one text utterance on an existing session
pub async fn say(app: &Router, session_id: &str, text: &str) -> serde_json::Value {
    let (status, body) = post_json(
        app,
        "/session/text",
        &serde_json::json!({ "session_id": session_id, "text": text }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "turn failed: {body}");
    body
}
