// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Unsupported document format: '{filename}'")]
    #[diagnostic(
        code(dealsign::document::unsupported),
        help("Convert the document to plain text (.txt or .md) before uploading")
    )]
    UnsupportedDocument { filename: String },

    #[error("Invalid upload: {0}")]
    #[diagnostic(code(dealsign::document::invalid_upload))]
    InvalidUpload(String),

    #[error("Failed to read document '{path}': {source}")]
    #[diagnostic(code(dealsign::document::unreadable))]
    UnreadableDocument {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(dealsign::config::error))]
    Config(String),

    #[error("Server error: {0}")]
    #[diagnostic(
        code(dealsign::server::error),
        help("Check that the port is free and the host address is valid")
    )]
    Server(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(dealsign::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
