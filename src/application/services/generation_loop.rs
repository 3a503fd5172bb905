use std::sync::Arc;

use crate::application::ports::{
    InvocationParams, ModelClient, ModelClientError, ModelInput, Role, Turn,
};

use super::response_extractor::ResponseExtractor;

/// How the loop carries context between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    /// Each attempt feeds the whole accumulated text back as a single-shot
    /// input and appends the completion to it.
    Accumulation,
    /// A role-tagged transcript, extended with a literal "continue" user
    /// turn while the closing tag is missing.
    Conversational,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub params: InvocationParams,
    pub max_attempts: u32,
    /// Cumulative token ceiling for the conversational strategy.
    pub token_budget: u64,
    pub strategy: GenerationStrategy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            params: InvocationParams::default(),
            max_attempts: 7,
            token_budget: 16384,
            strategy: GenerationStrategy::Accumulation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    ValidExtracted,
    MaxAttempts,
    TokenBudgetExceeded,
}

/// Terminal per-document outcome. Failure to extract is a degraded result,
/// not an error: the best-effort text is always usable.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub text: String,
    pub attempts: u32,
    pub valid: bool,
    pub reason: TerminalReason,
}

/// Bounded generate-and-validate protocol for a single document.
///
/// A `ModelClientError` is never retried here: an infrastructure fault
/// propagates to the caller, while "the model did not format its answer"
/// is expected and retried in-loop up to `max_attempts`.
pub struct GenerationLoop {
    model: Arc<dyn ModelClient>,
    extractor: ResponseExtractor,
    config: GenerationConfig,
}

impl GenerationLoop {
    pub fn new(
        model: Arc<dyn ModelClient>,
        extractor: ResponseExtractor,
        config: GenerationConfig,
    ) -> Self {
        Self {
            model,
            extractor,
            config,
        }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        document_text: &str,
    ) -> Result<GenerationOutcome, ModelClientError> {
        let system = format!("{}{}", prompt, self.extractor.tags().format_directive());

        match self.config.strategy {
            GenerationStrategy::Accumulation => {
                self.generate_accumulating(&system, document_text).await
            }
            GenerationStrategy::Conversational => {
                self.generate_conversational(&system, document_text).await
            }
        }
    }

    async fn generate_accumulating(
        &self,
        system: &str,
        document_text: &str,
    ) -> Result<GenerationOutcome, ModelClientError> {
        let mut output = document_text.to_string();
        let mut attempts = 0u32;

        while attempts < self.config.max_attempts {
            attempts += 1;
            tracing::debug!(attempt = attempts, "Model invocation");

            let completion = self
                .model
                .invoke(
                    system,
                    ModelInput::SingleShot { text: &output },
                    &self.config.params,
                )
                .await?;
            output.push_str(&completion.text);

            if let Some(answer) = self.extractor.extract(&output) {
                return Ok(GenerationOutcome {
                    text: answer,
                    attempts,
                    valid: true,
                    reason: TerminalReason::ValidExtracted,
                });
            }
        }

        tracing::warn!(
            attempts = attempts,
            "No valid response after exhausting attempts"
        );
        Ok(GenerationOutcome {
            text: output,
            attempts,
            valid: false,
            reason: TerminalReason::MaxAttempts,
        })
    }

    async fn generate_conversational(
        &self,
        system: &str,
        document_text: &str,
    ) -> Result<GenerationOutcome, ModelClientError> {
        let mut transcript = vec![Turn::user(document_text)];
        let mut attempts = 0u32;
        let mut used_tokens = 0u64;
        let mut budget_exceeded = false;

        loop {
            attempts += 1;
            tracing::debug!(attempt = attempts, used_tokens = used_tokens, "Model invocation");

            let completion = self
                .model
                .invoke(
                    system,
                    ModelInput::Conversation(&transcript),
                    &self.config.params,
                )
                .await?;
            // The provider reports cumulative usage per call; the latest
            // figure covers the whole transcript so far.
            used_tokens = completion.total_tokens.unwrap_or(used_tokens);
            let closed = self.extractor.contains_closing_tag(&completion.text);
            transcript.push(Turn::assistant(completion.text));

            if closed {
                break;
            }
            if attempts >= self.config.max_attempts {
                break;
            }
            if used_tokens >= self.config.token_budget {
                budget_exceeded = true;
                break;
            }
            transcript.push(Turn::user("continue"));
        }

        let assistant_text: String = transcript
            .iter()
            .filter(|t| t.role == Role::Assistant)
            .map(|t| t.text.as_str())
            .collect();

        match self.extractor.extract(&assistant_text) {
            Some(answer) => Ok(GenerationOutcome {
                text: answer,
                attempts,
                valid: true,
                reason: TerminalReason::ValidExtracted,
            }),
            None => {
                let reason = if budget_exceeded {
                    TerminalReason::TokenBudgetExceeded
                } else {
                    TerminalReason::MaxAttempts
                };
                tracing::warn!(
                    attempts = attempts,
                    used_tokens = used_tokens,
                    reason = ?reason,
                    "No valid response extracted from transcript"
                );
                Ok(GenerationOutcome {
                    text: assistant_text,
                    attempts,
                    valid: false,
                    reason,
                })
            }
        }
    }
}
