//! Configuration management for the kiosk gateway
//!
//! Everything is sourced from environment variables with sensible defaults,
//! so a kiosk can be brought up with nothing but an `OPENAI_API_KEY`
//! (and even that is optional: without it the gateway runs rule-based only,
//! with no speech synthesis).

use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, Result};

/// Kiosk gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API server port (`KIOSK_PORT`, default 8080)
    pub port: u16,

    /// Idle session time-to-live (`KIOSK_SESSION_TTL_SECS`, default 600)
    pub session_ttl: Duration,

    /// Forced-reset guard: maximum turns per session (`KIOSK_MAX_TURNS`, default 40)
    pub max_turns: u32,

    /// `OpenAI` API key, shared by STT/TTS/NLU (`OPENAI_API_KEY`)
    pub openai_api_key: Option<String>,

    /// STT model (`KIOSK_STT_MODEL`, default "whisper-1")
    pub stt_model: String,

    /// TTS model (`KIOSK_TTS_MODEL`, default "tts-1")
    pub tts_model: String,

    /// TTS voice identifier (`KIOSK_TTS_VOICE`, default "nova")
    pub tts_voice: String,

    /// TTS speed multiplier (`KIOSK_TTS_SPEED`, default 1.0)
    pub tts_speed: f64,

    /// Chat model for enhanced parsing and general QA
    /// (`KIOSK_NLU_MODEL`, default "gpt-4o-mini")
    pub nlu_model: String,

    /// Directory for content-addressed TTS artifacts
    /// (`KIOSK_TTS_CACHE_DIR`, default `$TMPDIR/kiosk-tts`)
    pub tts_cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            session_ttl: Duration::from_secs(600),
            max_turns: 40,
            openai_api_key: None,
            stt_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "nova".to_string(),
            tts_speed: 1.0,
            nlu_model: "gpt-4o-mini".to_string(),
            tts_cache_dir: std::env::temp_dir().join("kiosk-tts"),
        }
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns error when a variable is present but unparseable
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = env_parsed::<u16>("KIOSK_PORT")? {
            config.port = port;
        }
        if let Some(secs) = env_parsed::<u64>("KIOSK_SESSION_TTL_SECS")? {
            config.session_ttl = Duration::from_secs(secs);
        }
        if let Some(turns) = env_parsed::<u32>("KIOSK_MAX_TURNS")? {
            config.max_turns = turns;
        }
        if let Some(speed) = env_parsed::<f64>("KIOSK_TTS_SPEED")? {
            if !(0.25..=4.0).contains(&speed) {
                return Err(Error::Config(format!(
                    "KIOSK_TTS_SPEED out of range 0.25-4.0: {speed}"
                )));
            }
            config.tts_speed = speed;
        }

        config.openai_api_key = non_empty_env("OPENAI_API_KEY");
        if let Some(model) = non_empty_env("KIOSK_STT_MODEL") {
            config.stt_model = model;
        }
        if let Some(model) = non_empty_env("KIOSK_TTS_MODEL") {
            config.tts_model = model;
        }
        if let Some(voice) = non_empty_env("KIOSK_TTS_VOICE") {
            config.tts_voice = voice;
        }
        if let Some(model) = non_empty_env("KIOSK_NLU_MODEL") {
            config.nlu_model = model;
        }
        if let Some(dir) = non_empty_env("KIOSK_TTS_CACHE_DIR") {
            config.tts_cache_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

/// Read an env var, treating empty strings as unset
fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an env var, erroring on malformed values
fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match non_empty_env(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("invalid {key}: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl, Duration::from_secs(600));
        assert_eq!(config.max_turns, 40);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.stt_model, "whisper-1");
    }
}
