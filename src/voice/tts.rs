//! Text-to-speech over the OpenAI speech API, with a disk cache
//!
//! The kiosk speaks from a small fixed script, so most lines repeat
//! thousands of times a day. Synthesized audio is cached on disk keyed by
//! a digest of model, voice, speed and text; a cache hit never touches the
//! network.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::{Error, Result};

const SPEECH_URL: &str = "https://api.openai.com/v1/audio/speech";

/// Synthesizes spoken responses as MP3 bytes
#[derive(Debug)]
pub struct Synthesizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    voice: String,
    speed: f64,
    cache_dir: PathBuf,
}

impl Synthesizer {
    /// Create a synthesizer backed by the OpenAI speech API
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or the cache directory
    /// cannot be created
    pub fn new(
        api_key: String,
        model: String,
        voice: String,
        speed: f64,
        cache_dir: PathBuf,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for speech synthesis".to_string(),
            ));
        }
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            voice,
            speed,
            cache_dir,
        })
    }

    /// Synthesize text to MP3 bytes, serving repeats from the cache
    ///
    /// # Errors
    ///
    /// Returns error when synthesis fails and no cached copy exists
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let path = self.cache_path(text);
        if let Ok(audio) = tokio::fs::read(&path).await {
            tracing::debug!(path = %path.display(), "speech cache hit");
            return Ok(audio);
        }

        let audio = self.synthesize_remote(text).await?;

        // a failed cache write costs a re-synthesis later, nothing more
        if let Err(e) = tokio::fs::write(&path, &audio).await {
            tracing::warn!(error = %e, path = %path.display(), "speech cache write failed");
        }
        Ok(audio)
    }

    /// Cache file for a given line, keyed by everything that shapes the audio
    fn cache_path(&self, text: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(self.model.as_bytes());
        hasher.update(b"|");
        hasher.update(self.voice.as_bytes());
        hasher.update(b"|");
        hasher.update(self.speed.to_bits().to_le_bytes());
        hasher.update(b"|");
        hasher.update(text.as_bytes());
        let digest = hex::encode(hasher.finalize());
        self.cache_dir.join(format!("{digest}.mp3"))
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    async fn synthesize_remote(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SpeechRequest<'a> {
            model: &'a str,
            input: &'a str,
            voice: &'a str,
            speed: f64,
        }

        let request = SpeechRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            speed: self.speed,
        };

        let response = self
            .client
            .post(SPEECH_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "speech API error");
            return Err(Error::Tts(format!("speech API error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), "speech synthesized");
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesizer(dir: &Path) -> Synthesizer {
        Synthesizer::new(
            "key".to_string(),
            "tts-1".to_string(),
            "nova".to_string(),
            1.0,
            dir.to_path_buf(),
        )
        .unwrap()
    }

    #[test]
    fn empty_key_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Synthesizer::new(
            String::new(),
            "tts-1".to_string(),
            "nova".to_string(),
            1.0,
            dir.path().to_path_buf(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn cache_key_depends_on_text_and_voice() {
        let dir = tempfile::tempdir().unwrap();
        let tts = synthesizer(dir.path());
        let a = tts.cache_path("안녕하세요");
        let b = tts.cache_path("감사합니다");
        assert_ne!(a, b);
        assert!(a.extension().is_some_and(|ext| ext == "mp3"));

        let other_voice = Synthesizer::new(
            "key".to_string(),
            "tts-1".to_string(),
            "alloy".to_string(),
            1.0,
            dir.path().to_path_buf(),
        )
        .unwrap();
        assert_ne!(a, other_voice.cache_path("안녕하세요"));
    }

    #[tokio::test]
    async fn cached_audio_is_served_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let tts = synthesizer(dir.path());

        let path = tts.cache_path("주문 도와드릴게요");
        tokio::fs::write(&path, b"mp3-bytes").await.unwrap();

        // the API key is fake, so a network round trip would fail
        let audio = tts.synthesize("주문 도와드릴게요").await.unwrap();
        assert_eq!(audio, b"mp3-bytes");
    }
}
