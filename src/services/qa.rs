// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

//! Lexical-overlap question answering used when no provider answers.

use crate::services::matcher::LoweredText;

pub const MAX_ANSWER_SENTENCES: usize = 3;
pub const GENERIC_ANSWER_SENTENCES: usize = 2;
pub const MIN_ANSWER_CHARS: usize = 20;

pub const LIMITED_INFO_NOTE: &str = "(Limited information found in the document.)";
pub const NO_INFORMATION: &str = "No relevant information was found in the document.";

const STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // auxiliary verbs
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "has", "have",
    "had", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // question words
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
    // prepositions
    "of", "in", "on", "at", "to", "for", "by", "with", "from", "about", "into", "onto", "under",
    "over", "after", "before", "between", "during", "within", "without", "upon",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence<'a> {
    pub text: &'a str,
    pub score: usize,
}

/// Distinct lowercase keywords of a question, stop words removed.
///
/// Falls back to every word longer than one character when the filter leaves nothing.
pub fn keywords(question: &str) -> Vec<String> {
    let words: Vec<String> = question
        .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '\'')
        .map(|w| w.trim_matches(|c| c == '-' || c == '\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    let mut filtered = dedup(
        words
            .iter()
            .filter(|w| !STOP_WORDS.contains(&w.as_str()))
            .cloned(),
    );
    if filtered.is_empty() {
        filtered = dedup(words.into_iter().filter(|w| w.chars().count() > 1));
    }
    filtered
}

fn dedup(words: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for w in words {
        if !out.contains(&w) {
            out.push(w);
        }
    }
    out
}

/// Sentences ending at `.`, `!` or `?` (terminator kept), trimmed, empties dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            sentences.push(&text[start..end]);
            start = end;
        }
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.trim_matches(|c| matches!(c, '.' | '!' | '?')).trim().is_empty())
        .collect()
}

/// Every sentence with its keyword score, best first; ties keep document order.
pub fn rank_sentences<'a>(text: &'a str, question: &str) -> Vec<ScoredSentence<'a>> {
    let keywords = keywords(question);
    let mut scored: Vec<ScoredSentence<'a>> = split_sentences(text)
        .into_iter()
        .map(|s| ScoredSentence {
            text: s,
            score: LoweredText::new(s).count_distinct(&keywords),
        })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

pub struct FallbackQa;

impl FallbackQa {
    /// Answer from the document text alone. Returns `None` only when the text has
    /// no sentences at all.
    pub fn try_answer(text: &str, question: &str) -> Option<String> {
        let ranked = rank_sentences(text, question);
        if ranked.is_empty() {
            return None;
        }

        let best: Vec<&str> = ranked
            .iter()
            .filter(|s| s.score > 0)
            .take(MAX_ANSWER_SENTENCES)
            .map(|s| s.text)
            .collect();

        if best.is_empty() {
            // No overlap with the question; answer with the opening sentences.
            let opening: Vec<&str> = split_sentences(text)
                .into_iter()
                .take(GENERIC_ANSWER_SENTENCES)
                .collect();
            return Some(opening.join(" "));
        }

        let answer = best.join(" ");
        if answer.chars().count() < MIN_ANSWER_CHARS {
            return Some(format!("{answer} {LIMITED_INFO_NOTE}"));
        }
        Some(answer)
    }

    pub fn answer(text: &str, question: &str) -> String {
        Self::try_answer(text, question).unwrap_or_else(|| NO_INFORMATION.to_string())
    }
}
