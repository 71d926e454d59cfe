// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use super::{Clause, RiskFinding};

/// Which strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    Fallback,
    Error,
}

impl Method {
    /// Fixed per-method confidence; not a calibrated probability.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Gemini | Self::OpenAi => 0.95,
            Self::Fallback => 0.65,
            Self::Error => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Fallback => "fallback",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub confidence: f64,
    pub method: Method,
}

impl Answer {
    pub fn from_method(answer: impl Into<String>, method: Method) -> Self {
        Self {
            answer: answer.into(),
            confidence: method.confidence(),
            method,
        }
    }

    /// An answer that carries no information, regardless of which method produced it.
    pub fn unanswerable(answer: impl Into<String>, method: Method) -> Self {
        Self {
            answer: answer.into(),
            confidence: 0.0,
            method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    pub method: Method,
}

/// Output of the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub risk_score: u32,
    pub clauses: Vec<Clause>,
    pub risks: Vec<RiskFinding>,
}
