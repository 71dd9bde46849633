//! Error types for the notas-core library.

use thiserror::Error;

use crate::models::document::DocumentKind;

/// Main error type for the notas library.
#[derive(Error, Debug)]
pub enum NotasError {
    /// Per-document extraction error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Reasons a single document is skipped by the engine.
///
/// None of these abort a batch; they are collected next to the records of
/// the documents that did succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The bytes are not well-formed XML (or not valid UTF-8).
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// The information block could not be located in any addressing style.
    #[error("no {kind} information block found")]
    MissingCore { kind: DocumentKind },

    /// Auto-detection found neither an NFe nor a CTe information block.
    #[error("document is neither NFe nor CTe")]
    UnknownKind,
}

impl From<roxmltree::Error> for DocumentError {
    fn from(err: roxmltree::Error) -> Self {
        DocumentError::Malformed(err.to_string())
    }
}

impl From<std::str::Utf8Error> for DocumentError {
    fn from(err: std::str::Utf8Error) -> Self {
        DocumentError::Malformed(format!("invalid UTF-8: {err}"))
    }
}

/// Result type for the notas library.
pub type Result<T> = std::result::Result<T, NotasError>;
