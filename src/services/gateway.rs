// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

//! Provider fallback chain for summaries and question answering.
//!
//! Every configured provider is tried once, in [`ProviderKind::ORDER`], before
//! the local deterministic method runs. Provider failures never reach the caller;
//! degraded results are signalled through the method tag and confidence.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{Answer, Method, Summary};
use crate::services::llm::{
    GenerateRequest, LlmProvider, Operation, ProviderFailure, ProviderKind, ProviderRegistry,
};
use crate::services::qa::{FallbackQa, NO_INFORMATION};
use crate::services::text::{truncate_chars, truncate_with_ellipsis};

const SUMMARY_SYSTEM_PROMPT: &str = "You are a legal assistant. Summarize the contract concisely in 3-4 sentences.";

const ANSWER_SYSTEM_PROMPT: &str = "You are a helpful legal assistant. Answer questions based ONLY on the provided contract text.";

pub const CANNOT_PROCESS: &str =
    "Cannot process the request: the document text or the question is empty.";

/// Result of walking the provider chain.
#[derive(Debug)]
pub enum ChainOutcome {
    Answered { kind: ProviderKind, text: String },
    /// Every available provider failed (possibly none were available).
    Exhausted { failures: Vec<ProviderFailure> },
}

pub struct ProviderGateway {
    registry: Arc<ProviderRegistry>,
    call_timeout: Duration,
    max_tokens: u32,
    summary_fallback_chars: usize,
}

impl ProviderGateway {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        let config = registry.config();
        Self {
            call_timeout: config.call_timeout(),
            max_tokens: config.max_tokens,
            summary_fallback_chars: config.summary_fallback_chars,
            registry,
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self::new(Arc::new(ProviderRegistry::new(config)))
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Summarize via the provider chain, falling back to a fixed-window excerpt.
    pub async fn summarize(&self, text: &str) -> Summary {
        if text.trim().is_empty() {
            return Summary {
                summary: String::new(),
                method: Method::Fallback,
            };
        }

        let outcome = self
            .run_chain(Operation::Summarize, |provider| GenerateRequest {
                system: SUMMARY_SYSTEM_PROMPT.into(),
                user: format!(
                    "Summarize this contract:\n\n{}",
                    truncate_chars(text, provider.context_chars(Operation::Summarize))
                ),
                max_tokens: self.max_tokens,
            })
            .await;

        match outcome {
            ChainOutcome::Answered { kind, text } => Summary {
                summary: text,
                method: kind.method(),
            },
            ChainOutcome::Exhausted { .. } => {
                info!("no provider summarized the document, using truncation summary");
                Summary {
                    summary: truncate_with_ellipsis(text, self.summary_fallback_chars),
                    method: Method::Fallback,
                }
            }
        }
    }

    pub async fn summarize_text(&self, text: &str) -> String {
        self.summarize(text).await.summary
    }

    /// Answer a question about `text`; never fails.
    pub async fn answer_question(&self, text: &str, question: &str) -> Answer {
        if text.trim().is_empty() || question.trim().is_empty() {
            return Answer::unanswerable(CANNOT_PROCESS, Method::Fallback);
        }

        let outcome = self
            .run_chain(Operation::Answer, |provider| GenerateRequest {
                system: ANSWER_SYSTEM_PROMPT.into(),
                user: format!(
                    "Contract Text:\n{}\n\nQuestion: {}",
                    truncate_chars(text, provider.context_chars(Operation::Answer)),
                    question.trim()
                ),
                max_tokens: self.max_tokens,
            })
            .await;

        let failures = match outcome {
            ChainOutcome::Answered { kind, text } => {
                return Answer::from_method(text, kind.method());
            }
            ChainOutcome::Exhausted { failures } => failures,
        };

        if let Some(answer) = FallbackQa::try_answer(text, question) {
            info!(
                failed_providers = failures.len(),
                "answering with keyword fallback"
            );
            return Answer::from_method(answer, Method::Fallback);
        }

        match failures.last() {
            Some(last) if !last.is_quota() => Answer::from_method(
                format!("Unable to answer the question: {last}"),
                Method::Error,
            ),
            _ => Answer::unanswerable(NO_INFORMATION, Method::Fallback),
        }
    }

    /// Try each available provider once, in order, until one answers.
    pub async fn run_chain<F>(&self, op: Operation, build: F) -> ChainOutcome
    where
        F: Fn(&dyn LlmProvider) -> GenerateRequest,
    {
        let providers = self.registry.available();
        if providers.is_empty() {
            debug!(%op, "no providers configured");
        }

        let mut failures = Vec::new();
        for (idx, (kind, provider)) in providers.iter().enumerate() {
            let request = build(provider.as_ref());
            debug!(%op, provider = %kind, prompt_chars = request.user.len(), "calling provider");

            let result = match tokio::time::timeout(self.call_timeout, provider.generate(&request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderFailure::new(
                    provider.name(),
                    None,
                    format!("timed out after {}s", self.call_timeout.as_secs_f32()),
                )),
            };

            match result {
                Ok(text) => {
                    debug!(%op, provider = %kind, chars = text.len(), "provider answered");
                    return ChainOutcome::Answered { kind: *kind, text };
                }
                Err(failure) => {
                    let next = providers.get(idx + 1).map(|(k, _)| k.to_string());
                    warn!(
                        %op,
                        provider = %kind,
                        failure_kind = ?failure.kind,
                        status = ?failure.status,
                        error = %failure.message,
                        next = next.as_deref().unwrap_or("local fallback"),
                        "provider call failed"
                    );
                    failures.push(failure);
                }
            }
        }

        ChainOutcome::Exhausted { failures }
    }
}
