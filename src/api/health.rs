//! Health and capability endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Capability report for kiosk clients
#[derive(Serialize)]
pub struct CapabilitiesResponse {
    pub stt_available: bool,
    pub tts_available: bool,
    pub enhanced_parsing: bool,
    pub live_sessions: usize,
}

/// Liveness probe - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// What can this deployment do right now?
async fn capabilities(State(state): State<Arc<ApiState>>) -> Json<CapabilitiesResponse> {
    let live_sessions = state.registry.lock().await.len();
    Json(CapabilitiesResponse {
        stt_available: state.stt.is_some(),
        tts_available: state.tts.is_some(),
        // speech and enhanced parsing share the one API key
        enhanced_parsing: state.stt.is_some(),
        live_sessions,
    })
}

/// Build health router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/capabilities", get(capabilities))
        .with_state(state)
}
