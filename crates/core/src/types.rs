//! Core types for ranklab
//!
//! This module defines the foundational types:
//! - DocumentId: Integer or string document identifier
//! - Document: Identifier plus raw text content

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document
///
/// Callers key documents by database row ids (integers) or by arbitrary
/// strings. A string that is the canonical decimal form of an integer is the
/// same id as that integer, so `"12"` and `12` refer to one document no matter
/// which form a JSON producer chose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged, from = "RawDocumentId")]
pub enum DocumentId {
    /// Integer id (e.g. a post id)
    Int(i64),
    /// Free-form string id
    Text(String),
}

/// Wire form before canonicalization
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocumentId {
    Int(i64),
    Text(String),
}

impl From<RawDocumentId> for DocumentId {
    fn from(raw: RawDocumentId) -> Self {
        match raw {
            RawDocumentId::Int(i) => DocumentId::Int(i),
            RawDocumentId::Text(s) => DocumentId::parse(&s),
        }
    }
}

impl DocumentId {
    /// Parse an id from text
    ///
    /// Canonical integers (`"7"`, `"-3"`) become [`DocumentId::Int`]; anything
    /// else, including `"007"` and `"7.0"`, stays text.
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(i) if i.to_string() == s => DocumentId::Int(i),
            _ => DocumentId::Text(s.to_string()),
        }
    }

    /// Extract an id from a JSON value
    ///
    /// Returns `None` for values that cannot identify a document: null,
    /// booleans, arrays, objects, empty strings, and non-integral numbers.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(DocumentId::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(DocumentId::Text(u.to_string()))
                } else {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| DocumentId::Int(f as i64))
                }
            }
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(DocumentId::parse(s)),
            _ => None,
        }
    }

    /// Integer value, if this is an integer id
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DocumentId::Int(i) => Some(*i),
            DocumentId::Text(_) => None,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Int(i) => write!(f, "{}", i),
            DocumentId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for DocumentId {
    fn from(i: i64) -> Self {
        DocumentId::Int(i)
    }
}

impl From<i32> for DocumentId {
    fn from(i: i32) -> Self {
        DocumentId::Int(i64::from(i))
    }
}

impl From<u32> for DocumentId {
    fn from(i: u32) -> Self {
        DocumentId::Int(i64::from(i))
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId::parse(s)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId::parse(&s)
    }
}

/// A document: identifier plus raw text
///
/// Documents are immutable once handed to a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: DocumentId,
    /// Raw text content
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            text: text.into(),
        }
    }
}
