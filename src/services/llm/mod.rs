// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

pub mod gemini;
pub mod openai;
pub mod registry;

pub use registry::{ProviderKind, ProviderRegistry};

/// The two operations sent to providers; each has its own context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Summarize,
    Answer,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summarize => write!(f, "summarize"),
            Self::Answer => write!(f, "answer"),
        }
    }
}

/// One generation call: a system instruction, the user content, and an output cap.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limit, exhausted quota, or billing problem.
    Quota,
    /// Anything else: network, timeout, server error, malformed response.
    Transient,
}

#[derive(Debug, Clone, Error)]
#[error("{provider}: {message}")]
pub struct ProviderFailure {
    pub provider: String,
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ProviderFailure {
    /// Build a failure and classify it from its status and text.
    pub fn new(provider: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            provider: provider.into(),
            kind: classify_failure(status, &message),
            status,
            message,
        }
    }

    pub fn is_quota(&self) -> bool {
        self.kind == FailureKind::Quota
    }
}

/// Status codes that always mean quota or billing exhaustion.
const QUOTA_STATUSES: &[u16] = &[402, 429];

/// Substrings providers put in quota/billing error bodies. Matched lowercase.
const QUOTA_MARKERS: &[&str] = &[
    "quota",
    "rate limit",
    "rate_limit",
    "ratelimit",
    "too many requests",
    "resource_exhausted",
    "resource exhausted",
    "insufficient_quota",
    "billing",
    "exceeded your current",
];

/// `429` as a standalone token, so ids and byte counts containing it don't match.
static QUOTA_STATUS_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b429\b").unwrap());

/// Decide whether a provider error is quota/billing related.
///
/// Providers share no structured error taxonomy, so this inspects the status
/// code first and then the error text.
pub fn classify_failure(status: Option<u16>, message: &str) -> FailureKind {
    if status.is_some_and(|s| QUOTA_STATUSES.contains(&s)) {
        return FailureKind::Quota;
    }
    let lower = message.to_lowercase();
    if QUOTA_MARKERS.iter().any(|m| lower.contains(m)) || QUOTA_STATUS_TEXT.is_match(&lower)
    {
        FailureKind::Quota
    } else {
        FailureKind::Transient
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Single non-streaming generation. No retries.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderFailure>;

    /// Maximum document characters sent for `op`.
    fn context_chars(&self, op: Operation) -> usize;

    fn name(&self) -> &str;
}

/// Map a transport error from reqwest into a classified failure.
pub(crate) fn transport_failure(provider: &str, err: reqwest::Error) -> ProviderFailure {
    if err.is_timeout() {
        ProviderFailure::new(provider, None, "request timed out")
    } else {
        ProviderFailure::new(provider, err.status().map(|s| s.as_u16()), err.to_string())
    }
}
