// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{Clause, ClauseCategory};
use crate::services::matcher::LoweredText;
use crate::services::text::{section_label, truncate_with_ellipsis};

/// Display length of a clause excerpt.
pub const CLAUSE_TEXT_CHARS: usize = 200;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

/// Trimmed, non-empty paragraphs separated by blank lines.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    BLANK_LINE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

pub struct ClauseExtractor;

impl ClauseExtractor {
    /// Classify every blank-line separated paragraph that matches a category.
    pub fn extract(text: &str) -> Vec<Clause> {
        let clauses: Vec<Clause> = paragraphs(text)
            .filter_map(Self::classify_paragraph)
            .collect();

        debug!(count = clauses.len(), "clauses extracted");
        clauses
    }

    fn classify_paragraph(paragraph: &str) -> Option<Clause> {
        let category = Self::categorize(paragraph)?;
        Some(Clause {
            category,
            text: truncate_with_ellipsis(paragraph, CLAUSE_TEXT_CHARS),
            section: section_label(paragraph),
            risk_level: category.default_risk(),
        })
    }

    /// First category in [`ClauseCategory::ALL`] order whose keywords appear.
    pub fn categorize(paragraph: &str) -> Option<ClauseCategory> {
        let lowered = LoweredText::new(paragraph);
        ClauseCategory::ALL
            .into_iter()
            .find(|c| lowered.contains_any(c.keywords()))
    }
}

pub fn extract_clauses(text: &str) -> Vec<Clause> {
    ClauseExtractor::extract(text)
}
