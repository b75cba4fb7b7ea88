//! Composable slot parsers: rule-based, LLM-enhanced, and their combinator
//!
//! The invocation contract is fixed everywhere: enhanced first, rule-based
//! fallback when the enhanced parser returns nothing — never the reverse,
//! and never both voted. [`OrElse`] encodes exactly that, so each
//! implementation stays independently testable.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::nlu::LanguageModel;
use crate::nlu::prompt::PromptSpec;

/// A slot parser: text in, optional typed value out, never an error
#[async_trait]
pub trait SlotParse<T>: Send + Sync {
    async fn parse(&self, text: &str) -> Option<T>;
}

/// Wraps one of the pure keyword parsers from [`crate::dialogue::parse`]
pub struct RuleParser<T>(pub fn(&str) -> Option<T>);

#[async_trait]
impl<T: Send> SlotParse<T> for RuleParser<T> {
    async fn parse(&self, text: &str) -> Option<T> {
        (self.0)(text)
    }
}

/// LLM-backed parser with a fixed prompt; any failure is `None`
pub struct LlmParser<T> {
    model: Arc<dyn LanguageModel>,
    spec: PromptSpec,
    _marker: PhantomData<fn() -> T>,
}

impl<T> LlmParser<T> {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>, spec: PromptSpec) -> Self {
        Self {
            model,
            spec,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send> SlotParse<T> for LlmParser<T> {
    async fn parse(&self, text: &str) -> Option<T> {
        let value = match self.model.ask(self.spec.system, self.spec.examples, text).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "enhanced parse failed, falling back");
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "enhanced parse returned unusable JSON");
                None
            }
        }
    }
}

/// Enhanced-then-fallback composition
pub struct OrElse<A, B>(pub A, pub B);

#[async_trait]
impl<T, A, B> SlotParse<T> for OrElse<A, B>
where
    T: Send,
    A: SlotParse<T>,
    B: SlotParse<T>,
{
    async fn parse(&self, text: &str) -> Option<T> {
        if let Some(parsed) = self.0.parse(text).await {
            return Some(parsed);
        }
        self.1.parse(text).await
    }
}

/// LLM-parsed combined cart edit: remove one item, optionally add another
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartEdit {
    pub remove: Option<String>,
    pub add: Option<String>,
}
