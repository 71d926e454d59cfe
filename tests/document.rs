// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::fs;

use dealsign::Error;
use dealsign::services::document::{load_document, parse_document, read_text};

#[test]
fn text_upload_is_normalized() {
    let text = parse_document("msa.TXT", b"  Section 1.\n\n  Payment\tis due.  ").unwrap();
    assert_eq!(text, "Section 1. Payment is due.");
}

#[test]
fn markdown_is_accepted() {
    let text = parse_document("terms.md", b"# Terms\n\nThe Client pays monthly.").unwrap();
    assert_eq!(text, "# Terms The Client pays monthly.");
}

#[test]
fn short_extraction_is_replaced_with_placeholder() {
    let text = parse_document("Lease.txt", b"Too short").unwrap();
    assert!(text.starts_with("This is a contract document titled lease.txt."));
    assert!(text.contains("termination, liability, and payment"));
}

#[test]
fn binary_formats_are_unsupported() {
    for name in ["contract.pdf", "contract.docx", "contract"] {
        let err = parse_document(name, b"binary").unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedDocument { ref filename } if filename == name),
            "{name}: {err}"
        );
    }
}

#[test]
fn load_document_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nda.txt");
    fs::write(
        &path,
        "Each party shall keep\nthe other's information confidential.",
    )
    .unwrap();

    let text = load_document(&path).unwrap();
    assert_eq!(
        text,
        "Each party shall keep the other's information confidential."
    );
}

#[test]
fn read_text_keeps_paragraph_breaks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("msa.txt");
    fs::write(&path, "1. Payment.\n\n2. Termination.").unwrap();

    assert_eq!(read_text(&path).unwrap(), "1. Payment.\n\n2. Termination.");
}

#[test]
fn missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_document(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, Error::UnreadableDocument { .. }));
}
