//! Language-understanding collaborators
//!
//! Everything here talks to an OpenAI-compatible chat-completions endpoint
//! and expects a single well-formed JSON object back. Any malformed or
//! missing response is treated as "no answer" by the callers, which then
//! fall back to rule-based logic or a fixed apology line.

pub mod parser;
pub mod prompt;
pub mod qa;

use async_trait::async_trait;

use crate::{Error, Result};

/// One few-shot example turn in a fixed prompt
#[derive(Debug, Clone, Copy)]
pub struct Exchange {
    pub user: &'static str,
    pub assistant: &'static str,
}

/// A language-understanding call with a fixed prompt and few-shot examples
///
/// Implementations must return structured JSON; callers never see free text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn ask(
        &self,
        system: &str,
        examples: &[Exchange],
        user: &str,
    ) -> Result<serde_json::Value>;
}

#[derive(serde::Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// `OpenAI`-compatible chat-completions client
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiChat {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("OpenAI API key required for NLU".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn ask(
        &self,
        system: &str,
        examples: &[Exchange],
        user: &str,
    ) -> Result<serde_json::Value> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: system,
        }];
        for ex in examples {
            messages.push(ChatMessage {
                role: "user",
                content: ex.user,
            });
            messages.push(ChatMessage {
                role: "assistant",
                content: ex.assistant,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user,
        });

        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0,
            "max_tokens": 400,
            "messages": messages,
        });

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat completion request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "chat API error");
            return Err(Error::Nlu(format!("chat API error {status}: {body}")));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| Error::Nlu("empty chat response".to_string()))?;

        extract_json(content)
    }
}

/// Pull the JSON object out of a model reply, tolerating code fences
fn extract_json(content: &str) -> Result<serde_json::Value> {
    let trimmed = content.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(stripped)
        .map_err(|e| Error::Nlu(format!("malformed JSON from model: {e}")))
}
