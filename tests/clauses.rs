// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod helpers;

use dealsign::domain::{Clause, ClauseCategory, RiskTier};
use dealsign::services::clauses::{CLAUSE_TEXT_CHARS, ClauseExtractor, extract_clauses};

use helpers::SAMPLE_CONTRACT;

fn render(clauses: &[Clause]) -> String {
    clauses
        .iter()
        .map(|c| format!("{} [{}] {}", c.category, c.section, c.risk_level))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sample_contract_clauses() {
    let clauses = extract_clauses(SAMPLE_CONTRACT);
    insta::assert_snapshot!(render(&clauses), @r"
    PAYMENT [1.1] LOW
    TERMINATION [2.] LOW
    LIABILITY [Article IV] MEDIUM
    CONFIDENTIALITY [3.2] LOW
    IP_RIGHTS [5] LOW
    ");
}

#[test]
fn indemnity_paragraph_is_medium_liability() {
    let clauses = ClauseExtractor::extract("The Supplier shall indemnify the Customer.");
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].category, ClauseCategory::Liability);
    assert_eq!(clauses[0].risk_level, RiskTier::Medium);
    assert_eq!(clauses[0].section, "");
}

#[test]
fn first_matching_category_wins() {
    // Mentions both a fee and termination; PAYMENT comes first.
    let category = ClauseExtractor::categorize("A termination fee of $500 applies.");
    assert_eq!(category, Some(ClauseCategory::Payment));

    let category = ClauseExtractor::categorize("Breach of confidential obligations.");
    assert_eq!(category, Some(ClauseCategory::Termination));
}

#[test]
fn keywords_match_case_insensitively() {
    assert_eq!(
        ClauseExtractor::categorize("ALL COPYRIGHT RESERVED"),
        Some(ClauseCategory::IpRights)
    );
}

#[test]
fn paragraphs_without_keywords_are_skipped() {
    let text = "Recitals.\n\nThe parties wish to work together.\n\nSignatures follow.";
    assert!(extract_clauses(text).is_empty());
}

#[test]
fn long_paragraph_is_truncated_with_ellipsis() {
    let paragraph = format!("Payment schedule: {}", "monthly ".repeat(40));
    let clauses = extract_clauses(&paragraph);

    assert_eq!(clauses.len(), 1);
    let text = &clauses[0].text;
    assert!(text.ends_with("..."));
    assert_eq!(text.chars().count(), CLAUSE_TEXT_CHARS + 3);
}

#[test]
fn short_paragraph_is_kept_whole() {
    let clauses = extract_clauses("4.1 Invoices are issued monthly.");
    assert_eq!(clauses[0].text, "4.1 Invoices are issued monthly.");
    assert_eq!(clauses[0].section, "4.1");
}

#[test]
fn whitespace_only_lines_separate_paragraphs() {
    let text = "Payment is due on receipt.\r\n   \r\nThe Client may terminate at will.";
    let clauses = extract_clauses(text);
    let categories: Vec<_> = clauses.iter().map(|c| c.category).collect();
    assert_eq!(
        categories,
        vec![ClauseCategory::Payment, ClauseCategory::Termination]
    );
}

#[test]
fn empty_text_has_no_clauses() {
    assert!(extract_clauses("").is_empty());
    assert!(extract_clauses("\n\n\n").is_empty());
}

#[test]
fn clause_serializes_with_wire_names() {
    let clause = &extract_clauses("Article II Limitation of damages.")[0];
    let json = serde_json::to_value(clause).unwrap();
    assert_eq!(json["type"], "LIABILITY");
    assert_eq!(json["riskLevel"], "MEDIUM");
    assert_eq!(json["section"], "Article II");
}

proptest::proptest! {
    #[test]
    fn extraction_is_deterministic(text in "[a-zA-Z0-9 .\n]{0,400}") {
        proptest::prop_assert_eq!(extract_clauses(&text), extract_clauses(&text));
    }

    #[test]
    fn excerpts_never_exceed_display_length(text in "(payment|fee|[a-z ]){0,300}") {
        for clause in extract_clauses(&text) {
            proptest::prop_assert!(clause.text.chars().count() <= CLAUSE_TEXT_CHARS + 3);
        }
    }
}
