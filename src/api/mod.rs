//! HTTP API server for the kiosk gateway

pub mod health;
pub mod session;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::Config;
use crate::dialogue::{Dispatcher, SessionRegistry};
use crate::nlu::OpenAiChat;
use crate::voice::{Synthesizer, Transcriber};

/// Shared state for API handlers
///
/// The registry mutex doubles as the per-session turn serializer: a turn
/// holds it from lookup to response, so two utterances for the same
/// session can never interleave.
#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<Mutex<SessionRegistry>>,
    pub dispatcher: Arc<Dispatcher>,
    /// Present only when `OPENAI_API_KEY` is set
    pub stt: Option<Arc<Transcriber>>,
    /// Present only when `OPENAI_API_KEY` is set
    pub tts: Option<Arc<Synthesizer>>,
}

impl ApiState {
    /// Wire up the collaborators the configuration allows
    ///
    /// Without an API key the kiosk still takes full text orders; speech
    /// endpoints answer 503 and parsing stays rule-based.
    ///
    /// # Errors
    ///
    /// Returns error when a configured collaborator fails to initialize
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Arc::new(Mutex::new(SessionRegistry::new(
            config.session_ttl,
            config.max_turns,
        )));

        let (dispatcher, stt, tts) = match &config.openai_api_key {
            Some(key) => {
                let chat = OpenAiChat::new(key.clone(), config.nlu_model.clone())?;
                let stt = Transcriber::new(key.clone(), config.stt_model.clone())?;
                let tts = Synthesizer::new(
                    key.clone(),
                    config.tts_model.clone(),
                    config.tts_voice.clone(),
                    config.tts_speed,
                    config.tts_cache_dir.clone(),
                )?;
                (
                    Dispatcher::with_language_model(Arc::new(chat)),
                    Some(Arc::new(stt)),
                    Some(Arc::new(tts)),
                )
            }
            None => {
                tracing::warn!("no OpenAI API key, speech and enhanced parsing disabled");
                (Dispatcher::new(), None, None)
            }
        };

        Ok(Self {
            registry,
            dispatcher: Arc::new(dispatcher),
            stt,
            tts,
        })
    }
}

/// Build the full application router
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router(state.clone()))
        .merge(session::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind and serve until the process is stopped
///
/// # Errors
///
/// Returns error when the port cannot be bound
pub async fn serve(state: Arc<ApiState>, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "kiosk gateway listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
