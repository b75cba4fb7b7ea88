//! General-question and UI-location answering
//!
//! Both are thin calls into the language model with fixed prompts. Order
//! state is never touched from here; a failed call degrades to a fixed
//! apology sentence so the kiosk always speaks something.

use std::sync::Arc;

use serde::Deserialize;

use crate::dialogue::script;
use crate::nlu::{LanguageModel, prompt};

/// Answer to a "where is X" question
#[derive(Debug, Clone, Deserialize)]
pub struct UiHelp {
    pub answer: String,
    /// Named UI element the client may highlight
    #[serde(default)]
    pub element: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneralAnswer {
    answer: String,
}

/// LLM-backed QA collaborator
pub struct QaService {
    model: Arc<dyn LanguageModel>,
}

impl QaService {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Free-text answer to a general café question
    pub async fn general_answer(&self, user_text: &str) -> String {
        let spec = prompt::GENERAL_QA;
        match self.model.ask(spec.system, spec.examples, user_text).await {
            Ok(value) => match serde_json::from_value::<GeneralAnswer>(value) {
                Ok(parsed) if !parsed.answer.trim().is_empty() => parsed.answer,
                _ => script::QA_UNAVAILABLE.to_string(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "general QA call failed");
                script::QA_UNAVAILABLE.to_string()
            }
        }
    }

    /// Answer a "where is this button" question
    pub async fn ui_help(&self, user_text: &str) -> UiHelp {
        let spec = prompt::UI_HELP;
        match self.model.ask(spec.system, spec.examples, user_text).await {
            Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "UI help returned unusable JSON");
                UiHelp {
                    answer: script::QA_UNAVAILABLE.to_string(),
                    element: None,
                }
            }),
            Err(e) => {
                tracing::warn!(error = %e, "UI help call failed");
                UiHelp {
                    answer: script::QA_UNAVAILABLE.to_string(),
                    element: None,
                }
            }
        }
    }
}
