// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

//! Lowercase substring matching shared by clause classification and risk scanning.

/// Text lowercased once so several keyword lists can be checked against it.
pub struct LoweredText {
    lower: String,
}

impl LoweredText {
    pub fn new(text: &str) -> Self {
        Self {
            lower: text.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.lower
    }

    /// `phrase` must already be lowercase.
    pub fn contains(&self, phrase: &str) -> bool {
        self.lower.contains(phrase)
    }

    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.contains(p))
    }

    /// Number of distinct `phrases` present.
    pub fn count_distinct<S: AsRef<str>>(&self, phrases: &[S]) -> usize {
        phrases
            .iter()
            .filter(|p| self.contains(p.as_ref()))
            .count()
    }
}
