// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use tracing::debug;

use crate::domain::{AnalysisReport, Answer};
use crate::services::clauses::ClauseExtractor;
use crate::services::gateway::ProviderGateway;
use crate::services::risks::RiskDetector;

/// Full analysis pipeline over one document. Holds no per-request state.
#[derive(Clone)]
pub struct Analyzer {
    gateway: Arc<ProviderGateway>,
}

impl Analyzer {
    pub fn new(gateway: Arc<ProviderGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ProviderGateway {
        &self.gateway
    }

    pub async fn analyze(&self, text: &str) -> AnalysisReport {
        let summary = self.gateway.summarize(text).await;
        let clauses = ClauseExtractor::extract(text);
        let report = RiskDetector::detect(text, &clauses);

        debug!(
            summary_method = %summary.method,
            clauses = clauses.len(),
            risks = report.risks.len(),
            risk_score = report.risk_score,
            "analysis complete"
        );

        AnalysisReport {
            summary: summary.summary,
            risk_score: report.risk_score,
            clauses,
            risks: report.risks,
        }
    }

    pub async fn ask(&self, text: &str, question: &str) -> Answer {
        self.gateway.answer_question(text, question).await
    }
}
