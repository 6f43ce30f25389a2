//! Mock provider implementation for testing.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A single recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
}

/// Mock text provider with per-model scripted outcomes.
///
/// Models without a script fail with `NotConfigured`. Every call is
/// recorded in order, whether it succeeds or not.
#[derive(Default)]
pub struct MockTextProvider {
    outcomes: HashMap<String, Result<String, ProviderError>>,
    calls: Mutex<Vec<RecordedCall>>,
    unhealthy: bool,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `model` to answer with `text`.
    pub fn respond(mut self, model: &str, text: impl Into<String>) -> Self {
        self.outcomes.insert(model.to_string(), Ok(text.into()));
        self
    }

    /// Script `model` to fail with `error`.
    pub fn fail(mut self, model: &str, error: ProviderError) -> Self {
        self.outcomes.insert(model.to_string(), Err(error));
        self
    }

    /// Make `health_check` report the provider as unreachable.
    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Models called so far, oldest first.
    pub fn models_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                model: model.to_string(),
                prompt: prompt.to_string(),
            });
        }

        match self.outcomes.get(model) {
            Some(Ok(text)) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: approx_tokens(prompt),
                output_tokens: approx_tokens(text),
                finish_reason: FinishReason::Complete,
            }),
            Some(Err(error)) => Err(error.clone()),
            None => Err(ProviderError::NotConfigured(format!(
                "No mock outcome for model {}",
                model
            ))),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.unhealthy {
            Err(ProviderError::NetworkError(
                "Mock provider unreachable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Rough token estimate (four bytes per token), saturating at `i32::MAX`.
fn approx_tokens(text: &str) -> i32 {
    i32::try_from(text.len() / 4).unwrap_or(i32::MAX)
}
