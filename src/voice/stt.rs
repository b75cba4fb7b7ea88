//! Speech-to-text over the OpenAI Whisper API
//!
//! Kiosk microphones produce short Korean utterances, so every request
//! carries a `language=ko` hint. Transient failures are retried with
//! backoff; a final failure surfaces as [`crate::Error::Stt`] and the
//! caller answers with the spoken apology instead of an error code.

use crate::voice::retry::{self, RetryPolicy};
use crate::{Error, Result};

const TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Response from the Whisper transcription API
#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Transcribes kiosk audio to Korean text
#[derive(Debug)]
pub struct Transcriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
    policy: RetryPolicy,
}

impl Transcriber {
    /// Create a transcriber backed by Whisper
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for transcription".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            policy: RetryPolicy::default(),
        })
    }

    /// Transcribe audio to text, retrying transient failures
    ///
    /// # Arguments
    ///
    /// * `audio` - WAV audio bytes
    ///
    /// # Errors
    ///
    /// Returns error when the audio is empty or every attempt fails
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::Stt("empty audio".to_string()));
        }

        let mut attempt = 0;
        loop {
            match self.transcribe_once(audio).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.policy.max_retries && e.is_transient() => {
                    let delay = retry::delay_for_attempt(&self.policy, attempt);
                    tracing::warn!(error = %e, attempt, delay_ms = delay.as_millis(), "transcription retry");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn transcribe_once(&self, audio: &[u8]) -> std::result::Result<String, AttemptError> {
        tracing::debug!(audio_bytes = audio.len(), "starting transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("utterance.wav")
                    .mime_str("audio/wav")?,
            )
            .text("model", self.model.clone())
            .text("language", "ko");

        let response = self
            .client
            .post(TRANSCRIPTION_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "transcription request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Whisper API error");
            return Err(AttemptError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse transcription response");
            e
        })?;

        tracing::info!(transcript = %result.text, "transcription complete");
        Ok(result.text)
    }
}

/// Outcome of a single transcription attempt, keeping the numeric status
/// so the retry loop can classify it instead of parsing error text.
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Whisper API error {status}: {body}")]
    Api { status: u16, body: String },
}

impl AttemptError {
    /// Worth retrying? Network-level failures always; API errors only for
    /// the recoverable status codes.
    fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => retry::is_recoverable(*status),
        }
    }
}

impl From<AttemptError> for Error {
    fn from(e: AttemptError) -> Self {
        match e {
            AttemptError::Http(e) => Self::Http(e),
            AttemptError::Api { status, body } => {
                Self::Stt(format!("Whisper API error {status}: {body}"))
            }
        }
    }
}
