//! Error types for ranklab
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Degenerate inputs (empty corpus, empty query, all-zero score families) are
//! not errors: they produce well-defined zero or empty results.

use crate::types::DocumentId;
use std::io;
use thiserror::Error;

/// Result type alias for ranklab operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ranklab
#[derive(Debug, Error)]
pub enum Error {
    /// A document id was looked up that the corpus does not contain
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Two documents in one corpus share an id
    #[error("Duplicate document id: {0}")]
    DuplicateDocument(DocumentId),

    /// Hand-assembled corpus statistics violate an invariant
    #[error("Invalid corpus statistics: {0}")]
    InvalidStatistics(String),

    /// A rerank payload could not be interpreted
    #[error("Invalid rerank payload: {0}")]
    InvalidPayload(String),

    /// Configuration file could not be read, parsed, or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
