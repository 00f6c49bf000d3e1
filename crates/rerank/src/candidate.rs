//! Typed re-rank inputs and outputs
//!
//! Required fields (`document_id` and the score) are struct fields; every
//! other field of an incoming item is carried unmodified in an open
//! `metadata` map and flattened back into the serialized output.

use ranklab_core::DocumentId;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names owned by the typed records
///
/// These never appear in `metadata`; they would collide with the typed fields
/// once metadata is flattened into the output.
pub const RESERVED_FIELDS: [&str; 4] = [
    "document_id",
    "relevance_score",
    "similarity_score",
    "position",
];

/// Legacy id field accepted when `document_id` is absent
pub const LEGACY_ID_FIELD: &str = "post_id";

/// Open map of pass-through fields
pub type Metadata = Map<String, Value>;

// ============================================================================
// Field Parsing
// ============================================================================

/// Interpret a JSON score field leniently
///
/// Numbers are taken as-is. Numeric strings (as SQL drivers return them) are
/// parsed. Anything else, including non-finite values, counts as 0.
pub fn parse_score(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Extract the document id of a JSON item
///
/// `document_id` wins over the legacy `post_id`. Returns `None` when neither
/// is a usable scalar.
pub fn item_id(item: &Map<String, Value>) -> Option<DocumentId> {
    match item.get("document_id") {
        Some(v) if !v.is_null() => DocumentId::from_json(v),
        _ => item.get(LEGACY_ID_FIELD).and_then(DocumentId::from_json),
    }
}

fn metadata_of(item: &Map<String, Value>) -> Metadata {
    item.iter()
        .filter(|(k, _)| !RESERVED_FIELDS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn insert_metadata(metadata: &mut Metadata, key: String, value: Value) {
    if !RESERVED_FIELDS.contains(&key.as_str()) {
        metadata.insert(key, value);
    }
}

// ============================================================================
// LexicalHit
// ============================================================================

/// One item of a lexical (full-text) result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalHit {
    /// Document identifier
    pub document_id: DocumentId,
    /// Lexical relevance score
    pub relevance_score: f64,
    /// Pass-through fields
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl LexicalHit {
    /// Create a hit without metadata
    pub fn new(document_id: impl Into<DocumentId>, relevance_score: f64) -> Self {
        LexicalHit {
            document_id: document_id.into(),
            relevance_score,
            metadata: Metadata::new(),
        }
    }

    /// Builder: add a pass-through field
    ///
    /// Reserved field names are ignored.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        insert_metadata(&mut self.metadata, key.into(), value.into());
        self
    }

    /// Read a hit from a JSON item
    ///
    /// Returns `None` for non-objects and items without a usable id. A missing
    /// or non-numeric `relevance_score` counts as 0.
    pub fn from_json(value: &Value) -> Option<Self> {
        let item = value.as_object()?;
        Some(LexicalHit {
            document_id: item_id(item)?,
            relevance_score: parse_score(item.get("relevance_score")),
            metadata: metadata_of(item),
        })
    }
}

// ============================================================================
// VectorHit
// ============================================================================

/// One item of a vector (embedding similarity) result list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorHit {
    /// Document identifier
    pub document_id: DocumentId,
    /// Vector similarity score
    pub similarity_score: f64,
    /// Pass-through fields
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl VectorHit {
    /// Create a hit without metadata
    pub fn new(document_id: impl Into<DocumentId>, similarity_score: f64) -> Self {
        VectorHit {
            document_id: document_id.into(),
            similarity_score,
            metadata: Metadata::new(),
        }
    }

    /// Builder: add a pass-through field
    ///
    /// Reserved field names are ignored.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        insert_metadata(&mut self.metadata, key.into(), value.into());
        self
    }

    /// Read a hit from a JSON item
    ///
    /// Returns `None` for non-objects and items without a usable id. A missing
    /// or non-numeric `similarity_score` counts as 0.
    pub fn from_json(value: &Value) -> Option<Self> {
        let item = value.as_object()?;
        Some(VectorHit {
            document_id: item_id(item)?,
            similarity_score: parse_score(item.get("similarity_score")),
            metadata: metadata_of(item),
        })
    }
}

// ============================================================================
// Merged candidates
// ============================================================================

/// A document after merging both lists, before ordering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedCandidate {
    /// Document identifier
    pub document_id: DocumentId,
    /// Lexical score, 0 if the lexical list did not contain the document
    pub relevance_score: f64,
    /// Vector score, 0 if the vector list did not contain the document
    pub similarity_score: f64,
    /// Pass-through fields of the item that created the entry
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Final re-ranked item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// Document identifier
    pub document_id: DocumentId,
    /// Lexical score as supplied
    pub relevance_score: f64,
    /// Vector score as supplied
    pub similarity_score: f64,
    /// 1-based rank
    pub position: usize,
    /// Pass-through fields
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl RankedCandidate {
    pub(crate) fn from_merged(merged: MergedCandidate, position: usize) -> Self {
        RankedCandidate {
            document_id: merged.document_id,
            relevance_score: merged.relevance_score,
            similarity_score: merged.similarity_score,
            position,
            metadata: merged.metadata,
        }
    }
}
