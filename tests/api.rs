//! API endpoint integration tests

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

mod common;
use common::{get_json, post_json, router_with_limits, say, test_router};

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_router();
    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn capabilities_reflect_missing_speech_stack() {
    let app = test_router();
    let (status, json) = get_json(&app, "/capabilities").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stt_available"], false);
    assert_eq!(json["tts_available"], false);
    assert_eq!(json["enhanced_parsing"], false);
    assert_eq!(json["live_sessions"], 0);
}

#[tokio::test]
async fn start_opens_a_greeting_session() {
    let app = test_router();
    let (status, json) = post_json(&app, "/session/start", &serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["session_id"].is_string());
    assert!(json["response"].as_str().unwrap().contains("주문"));
    assert_eq!(json["state"]["step"], "greeting");
    assert_eq!(json["state"]["turn_count"], 0);
}

#[tokio::test]
async fn text_turn_without_session_id_creates_one() {
    let app = test_router();
    let (status, json) = post_json(
        &app,
        "/session/text",
        &serde_json::json!({ "text": "주문할게요" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["session_id"].is_string());
    assert_eq!(json["state"]["step"], "dine_type");
    assert_eq!(json["closed"], false);
}

#[tokio::test]
async fn full_text_order_over_http() {
    let app = test_router();
    let (_, started) = post_json(&app, "/session/start", &serde_json::json!({})).await;
    let sid = started["session_id"].as_str().unwrap().to_string();

    say(&app, &sid, "주문할게요").await;
    say(&app, &sid, "포장이요").await;
    let turn = say(&app, &sid, "아이스 아메리카노 주세요").await;
    assert_eq!(turn["state"]["step"], "size");
    assert_eq!(turn["payload"]["menu_id"], "COFFEE_AMERICANO");
    assert_eq!(turn["payload"]["temp"], "ice");

    say(&app, &sid, "톨로 주세요").await;
    say(&app, &sid, "옵션은 없어요").await;
    let turn = say(&app, &sid, "네").await;
    assert_eq!(turn["state"]["step"], "menu_item");
    assert_eq!(turn["payload"]["add_to_cart"], true);
    assert_eq!(turn["state"]["cart"].as_array().unwrap().len(), 1);

    say(&app, &sid, "카드로 결제할게요").await;
    let done = say(&app, &sid, "됐어요").await;
    assert_eq!(done["state"]["step"], "done");
    assert_eq!(done["payload"]["payment_method"], "card");
    assert!(done["response"].as_str().unwrap().contains("결제가 완료"));

    // state endpoint agrees with the last turn
    let (status, state) = get_json(&app, &format!("/session/{sid}/state")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["step"], "done");
}

#[tokio::test]
async fn result_endpoint_replays_the_last_turn() {
    let app = test_router();
    let (_, started) = post_json(&app, "/session/start", &serde_json::json!({})).await;
    let sid = started["session_id"].as_str().unwrap().to_string();

    // no turn has run yet
    let (status, _) = get_json(&app, &format!("/session/{sid}/result")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let turn = say(&app, &sid, "주문할게요").await;
    let (status, result) = get_json(&app, &format!("/session/{sid}/result")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["response_text"], turn["response"]);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = test_router();
    let (status, json) = get_json(&app, "/session/nope/state").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let app = test_router();
    let (status, json) = post_json(
        &app,
        "/session/text",
        &serde_json::json!({ "text": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn voice_without_stt_is_unavailable() {
    let app = test_router();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/session/any/voice")
                .body(Body::from(vec![0u8; 64]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn speech_without_tts_is_unavailable() {
    let app = test_router();
    let (status, json) = post_json(
        &app,
        "/speech",
        &serde_json::json!({ "text": "안녕하세요" }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "not_configured");
}

#[tokio::test]
async fn turn_cap_closes_the_session_and_forgets_it() {
    let app = router_with_limits(Duration::from_secs(600), 2);
    let (_, started) = post_json(&app, "/session/start", &serde_json::json!({})).await;
    let sid = started["session_id"].as_str().unwrap().to_string();

    say(&app, &sid, "주문할게요").await;
    say(&app, &sid, "포장이요").await;

    // third turn exceeds the cap of two
    let (status, closing) = post_json(
        &app,
        "/session/text",
        &serde_json::json!({ "session_id": sid, "text": "아메리카노" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closing["closed"], true);
    assert!(closing["response"].as_str().unwrap().contains("다시 시작"));

    // the session is gone for good
    let (status, _) = get_json(&app, &format!("/session/{sid}/state")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expired_session_id_starts_fresh_instead_of_resuming() {
    let app = router_with_limits(Duration::ZERO, 40);
    let (_, started) = post_json(&app, "/session/start", &serde_json::json!({})).await;
    let sid = started["session_id"].as_str().unwrap().to_string();

    // TTL zero: the next touch evicts, and the id is not resurrected
    let (status, json) = post_json(
        &app,
        "/session/text",
        &serde_json::json!({ "session_id": sid, "text": "주문할게요" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(json["session_id"].as_str().unwrap(), sid);
}
