// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Dotted numbers before bare ones so "2.3" is not cut to "2".
static SECTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)+|\d+\.?|Article\s+[IVX]+\b)").unwrap()
});

/// Collapse every whitespace run (newlines included) into a single space and trim.
pub fn normalize(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Leading section marker of a paragraph: `2.3`, `4.`, `Article IV`, or empty.
pub fn section_label(paragraph: &str) -> String {
    SECTION_LABEL
        .find(paragraph.trim())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Borrow at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Cut to `max_chars` characters and mark the cut with `...`.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let cut = truncate_chars(text, max_chars);
    if cut.len() < text.len() {
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
