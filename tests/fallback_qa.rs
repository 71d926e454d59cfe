// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use proptest::prelude::*;

use dealsign::services::qa::{
    FallbackQa, LIMITED_INFO_NOTE, NO_INFORMATION, keywords, rank_sentences, split_sentences,
};

const CONTRACT: &str = "This agreement covers consulting services. \
    The payment term is net 30 days from invoice. \
    Either party may end the engagement with notice. \
    Late payment accrues interest monthly.";

#[test]
fn keywords_drop_stop_words_and_duplicates() {
    assert_eq!(keywords("What is the payment term?"), vec!["payment", "term"]);
    assert_eq!(
        keywords("Payment, payment and PAYMENT"),
        vec!["payment", "and"]
    );
}

#[test]
fn keywords_fall_back_when_everything_is_a_stop_word() {
    assert_eq!(keywords("What is the?"), vec!["what", "is", "the"]);
    assert!(keywords("a?").is_empty());
}

#[test]
fn sentences_keep_their_terminators() {
    let sentences = split_sentences("First point. Second point! Third? Trailing fragment");
    assert_eq!(
        sentences,
        vec![
            "First point.",
            "Second point!",
            "Third?",
            "Trailing fragment"
        ]
    );
}

#[test]
fn punctuation_only_fragments_are_dropped() {
    assert!(split_sentences("... !? .").is_empty());
}

#[test]
fn best_matching_sentence_ranks_first() {
    let ranked = rank_sentences(CONTRACT, "What is the payment term?");
    assert_eq!(
        ranked[0].text,
        "The payment term is net 30 days from invoice."
    );
    assert_eq!(ranked[0].score, 2);
    assert_eq!(ranked[1].text, "Late payment accrues interest monthly.");
    assert_eq!(ranked[1].score, 1);
}

#[test]
fn payment_question_ranks_payment_sentence_above_unrelated_ones() {
    let text = "This agreement is governed by the laws of Delaware. \
        Payment is due within 30 days of invoice. \
        Notices must be sent in writing.";
    let ranked = rank_sentences(text, "What is the payment term?");

    assert_eq!(ranked[0].text, "Payment is due within 30 days of invoice.");
    assert!(ranked[1..].iter().all(|s| s.score < ranked[0].score));
}

#[test]
fn keyword_inside_longer_word_counts_as_a_match() {
    // "term" is found inside "terminate", so both sentences score 1 and document order decides.
    let ranked = rank_sentences(
        "Either party may terminate this agreement. Payment is due within 30 days of invoice.",
        "What is the payment term?",
    );
    assert_eq!(ranked[0].text, "Either party may terminate this agreement.");
    assert_eq!(ranked[0].score, 1);
    assert_eq!(ranked[1].text, "Payment is due within 30 days of invoice.");
    assert_eq!(ranked[1].score, 1);
}

#[test]
fn ties_keep_document_order() {
    let ranked = rank_sentences("Fee one applies. Fee two applies.", "fee");
    assert_eq!(ranked[0].text, "Fee one applies.");
    assert_eq!(ranked[1].text, "Fee two applies.");
}

#[test]
fn answer_joins_only_matching_sentences() {
    let answer = FallbackQa::answer(CONTRACT, "What is the payment term?");
    assert_eq!(
        answer,
        "The payment term is net 30 days from invoice. Late payment accrues interest monthly."
    );
}

#[test]
fn unrelated_question_returns_opening_sentences() {
    let answer = FallbackQa::answer(CONTRACT, "Who is the governing jurisdiction?");
    assert_eq!(
        answer,
        "This agreement covers consulting services. The payment term is net 30 days from invoice."
    );
}

#[test]
fn short_answer_gets_limited_information_note() {
    let answer = FallbackQa::answer("Fees apply. Nothing else here.", "fees?");
    assert_eq!(answer, format!("Fees apply. {LIMITED_INFO_NOTE}"));
}

#[test]
fn text_without_sentences_has_no_information() {
    assert_eq!(FallbackQa::try_answer("...", "payment"), None);
    assert_eq!(FallbackQa::answer("...", "payment"), NO_INFORMATION);
}

proptest! {
    #[test]
    fn answer_is_never_empty(text in "[A-Za-z ,.!?]{0,200}", question in "[A-Za-z ?]{0,40}") {
        prop_assert!(!FallbackQa::answer(&text, &question).trim().is_empty());
    }
}
