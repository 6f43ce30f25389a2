//! Question answering with a primary/fallback model pair.

use crate::config::ModelSelection;
use crate::services::providers::TextProvider;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Instant;

/// Prefix marking an answer that carries a provider failure instead of text.
pub const ERROR_PREFIX: &str = "Error: ";

/// Answers questions by asking the primary model, then the fallback model.
#[derive(Clone)]
pub struct AnswerService {
    provider: Arc<dyn TextProvider>,
    models: ModelSelection,
}

impl AnswerService {
    pub fn new(provider: Arc<dyn TextProvider>, models: ModelSelection) -> Self {
        Self { provider, models }
    }

    /// Answer `query`, never failing.
    ///
    /// The query is sent to the provider unchanged. When both models fail the
    /// result is `"Error: "` followed by the primary model's failure; the
    /// fallback failure only reaches the logs.
    pub async fn answer(&self, query: &str) -> String {
        let start = Instant::now();

        let primary_error = match self.provider.generate(&self.models.primary, query).await {
            Ok(response) => {
                tracing::debug!(
                    model = %self.models.primary,
                    output_tokens = response.output_tokens,
                    "Answered with primary model"
                );
                record("primary", start);
                return response.text;
            }
            Err(e) => e,
        };

        tracing::warn!(
            model = %self.models.primary,
            fallback = %self.models.fallback,
            error = %primary_error,
            "Primary model failed, trying fallback"
        );

        match self.provider.generate(&self.models.fallback, query).await {
            Ok(response) => {
                tracing::debug!(
                    model = %self.models.fallback,
                    output_tokens = response.output_tokens,
                    "Answered with fallback model"
                );
                record("fallback", start);
                response.text
            }
            Err(fallback_error) => {
                tracing::error!(
                    primary_model = %self.models.primary,
                    primary_error = %primary_error,
                    fallback_model = %self.models.fallback,
                    fallback_error = %fallback_error,
                    "Both models failed"
                );
                record("error", start);
                format!("{}{}", ERROR_PREFIX, primary_error)
            }
        }
    }
}

fn record(outcome: &'static str, start: Instant) {
    counter!("answer_requests_total", "outcome" => outcome).increment(1);
    histogram!("answer_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
