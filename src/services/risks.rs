// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use tracing::debug;

use crate::domain::{
    Clause, MAX_RISK_SCORE, RiskFinding, RiskReport, Severity, default_clause_reference,
};
use crate::services::clauses::{CLAUSE_TEXT_CHARS, paragraphs};
use crate::services::matcher::LoweredText;
use crate::services::text::truncate_with_ellipsis;

pub struct RiskPattern {
    pub phrase: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommendation: &'static str,
}

/// Scanned in order; findings keep this order.
pub const RISK_CATALOG: &[RiskPattern] = &[
    RiskPattern {
        phrase: "unlimited liability",
        severity: Severity::Critical,
        description: "Unlimited liability exposure detected.",
        recommendation: "Cap liability at contract value or fixed amount.",
    },
    RiskPattern {
        phrase: "terminate without notice",
        severity: Severity::High,
        description: "Right to terminate without prior notice.",
        recommendation: "Require at least 30 days prior written notice.",
    },
    RiskPattern {
        phrase: "sole discretion",
        severity: Severity::Medium,
        description: "One-sided discretion favoring the other party.",
        recommendation: "Change to 'reasonable discretion' or mutual consent.",
    },
    RiskPattern {
        phrase: "auto-renew",
        severity: Severity::Medium,
        description: "Automatic renewal clause detected.",
        recommendation: "Ensure opt-out window is tracked.",
    },
    RiskPattern {
        phrase: "waive jury trial",
        severity: Severity::High,
        description: "Waiver of right to jury trial.",
        recommendation: "Review the legal implications of the restricted rights.",
    },
];

pub struct RiskDetector;

impl RiskDetector {
    /// One finding per matching catalog phrase, no matter how often it occurs.
    pub fn detect(text: &str, clauses: &[Clause]) -> RiskReport {
        let lowered = LoweredText::new(text);
        let paragraphs: Vec<&str> = paragraphs(text).collect();
        let mut risks = Vec::new();
        let mut total: u32 = 0;

        for pattern in RISK_CATALOG {
            if !lowered.contains(pattern.phrase) {
                continue;
            }
            total += pattern.severity.weight();
            risks.push(RiskFinding {
                severity: pattern.severity,
                description: pattern.description.to_string(),
                recommendation: pattern.recommendation.to_string(),
                clause_reference: Self::clause_reference(pattern.phrase, clauses, &paragraphs),
            });
        }

        let risk_score = total.min(MAX_RISK_SCORE);
        debug!(findings = risks.len(), risk_score, "risk scan complete");

        RiskReport { risks, risk_score }
    }

    fn clause_reference(phrase: &str, clauses: &[Clause], paragraphs: &[&str]) -> String {
        clauses
            .iter()
            .filter(|c| !c.section.is_empty())
            .find(|c| LoweredText::new(Self::full_text(c, paragraphs)).contains(phrase))
            .map(|c| format!("Section {}", c.section))
            .unwrap_or_else(default_clause_reference)
    }

    /// The untruncated paragraph a clause excerpt was cut from, or the excerpt
    /// itself when the paragraph isn't in the text.
    fn full_text<'a>(clause: &'a Clause, paragraphs: &[&'a str]) -> &'a str {
        paragraphs
            .iter()
            .copied()
            .find(|p| truncate_with_ellipsis(p, CLAUSE_TEXT_CHARS) == clause.text)
            .unwrap_or(&clause.text)
    }
}

pub fn detect_risks(text: &str, clauses: &[Clause]) -> (Vec<RiskFinding>, u32) {
    let report = RiskDetector::detect(text, clauses);
    (report.risks, report.risk_score)
}
