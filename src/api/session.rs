//! Ordering session endpoints
//!
//! One session per customer standing at the kiosk. Text and voice turns
//! land on the same dispatcher; voice is transcribed first and the
//! transcript echoed back so the client can display what was heard.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use super::ApiState;
use crate::dialogue::{OrderPayload, OrderSnapshot, StoredTurn, Turn, TurnAdmission, script};

/// Largest audio upload accepted, in bytes
const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

/// Build session router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/session/start", post(start))
        .route("/session/text", post(text_turn))
        .route("/session/{session_id}/voice", post(voice_turn))
        .route("/session/{session_id}/state", get(session_state))
        .route("/session/{session_id}/result", get(session_result))
        .route("/speech", post(speech))
        .with_state(state)
}

/// Response to opening a session
#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: String,
    pub response: String,
    pub state: OrderSnapshot,
}

/// One processed turn, text or voice
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    /// What the STT heard, voice turns only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    pub response: String,
    /// True when the session was terminated by the turn cap
    pub closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<OrderSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<OrderPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_element: Option<String>,
}

impl TurnResponse {
    fn from_turn(session_id: String, transcript: Option<String>, turn: Turn) -> Self {
        Self {
            session_id,
            transcript,
            response: turn.response,
            closed: false,
            state: Some(turn.snapshot),
            payload: turn.payload,
            ui_element: turn.ui_element,
        }
    }

    fn closed(session_id: String) -> Self {
        Self {
            session_id,
            transcript: None,
            response: script::SESSION_LIMIT.to_string(),
            closed: true,
            state: None,
            payload: None,
            ui_element: None,
        }
    }

    fn apology(session_id: String) -> Self {
        Self {
            session_id,
            transcript: None,
            response: script::STT_APOLOGY.to_string(),
            closed: false,
            state: None,
            payload: None,
            ui_element: None,
        }
    }
}

/// Open a fresh ordering session
async fn start(State(state): State<Arc<ApiState>>) -> Json<StartResponse> {
    let mut registry = state.registry.lock().await;
    let (session_id, store) = registry.get_or_create(None);
    let snapshot = store.snapshot();
    Json(StartResponse {
        session_id,
        response: script::GREETING.to_string(),
        state: snapshot,
    })
}

/// Text turn request
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// Omitted or unknown ids start a new session
    pub session_id: Option<String>,
    pub text: String,
}

/// Process one text utterance
async fn text_turn(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("empty text"));
    }

    let mut registry = state.registry.lock().await;
    let session_id = registry.get_or_create(request.session_id.as_deref()).0;

    if registry.begin_turn(&session_id) == TurnAdmission::LimitReached {
        return Ok(Json(TurnResponse::closed(session_id)));
    }
    let store = registry
        .store_mut(&session_id)
        .ok_or(ApiError::NotFound("session not found"))?;

    let turn = state.dispatcher.handle_turn(store, &request.text).await;
    Ok(Json(TurnResponse::from_turn(session_id, None, turn)))
}

/// Process one voice utterance (raw WAV body)
async fn voice_turn(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> Result<Json<TurnResponse>, ApiError> {
    let stt = state
        .stt
        .as_ref()
        .ok_or(ApiError::NotConfigured("speech-to-text not configured"))?;
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty audio data"));
    }
    if body.len() > MAX_AUDIO_BYTES {
        return Err(ApiError::BadRequest("audio too large"));
    }

    // session must already exist for voice; kiosks open it via /session/start
    {
        let mut registry = state.registry.lock().await;
        if registry.peek(&session_id).is_none() {
            return Err(ApiError::NotFound("session not found"));
        }
    }

    // transcription happens outside the lock; a failure costs no turn
    let transcript = match stt.transcribe(&body).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, session = %session_id, "transcription failed");
            return Ok(Json(TurnResponse::apology(session_id)));
        }
    };

    let mut registry = state.registry.lock().await;
    if registry.peek(&session_id).is_none() {
        return Err(ApiError::NotFound("session not found"));
    }
    if registry.begin_turn(&session_id) == TurnAdmission::LimitReached {
        return Ok(Json(TurnResponse::closed(session_id)));
    }
    let store = registry
        .store_mut(&session_id)
        .ok_or(ApiError::NotFound("session not found"))?;

    let turn = state.dispatcher.handle_turn(store, &transcript).await;
    Ok(Json(TurnResponse::from_turn(
        session_id,
        Some(transcript),
        turn,
    )))
}

/// Current order snapshot
async fn session_state(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
) -> Result<Json<OrderSnapshot>, ApiError> {
    let mut registry = state.registry.lock().await;
    let store = registry
        .peek(&session_id)
        .ok_or(ApiError::NotFound("session not found"))?;
    Ok(Json(store.snapshot()))
}

/// Result of the most recent turn
async fn session_result(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<String>,
) -> Result<Json<StoredTurn>, ApiError> {
    let mut registry = state.registry.lock().await;
    let store = registry
        .peek(&session_id)
        .ok_or(ApiError::NotFound("session not found"))?;
    store
        .last_response
        .clone()
        .map(Json)
        .ok_or(ApiError::NotFound("no completed turn yet"))
}

/// Speech synthesis request
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// Synthesize a response line to MP3
async fn speech(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SpeechRequest>,
) -> Result<Response, ApiError> {
    let tts = state
        .tts
        .as_ref()
        .ok_or(ApiError::NotConfigured("text-to-speech not configured"))?;
    if request.text.is_empty() {
        return Err(ApiError::BadRequest("empty text"));
    }

    let audio = tts
        .synthesize(&request.text)
        .await
        .map_err(|e| ApiError::SynthesisFailed(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        audio,
    )
        .into_response())
}

/// Session API errors
#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    BadRequest(&'static str),
    NotConfigured(&'static str),
    SynthesisFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.to_string()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_string()),
            Self::NotConfigured(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg.to_string())
            }
            Self::SynthesisFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "synthesis_failed", msg)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody { code, message },
            }),
        )
            .into_response()
    }
}
