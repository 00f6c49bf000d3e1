//! Re-rank request intake
//!
//! Accepted shapes, in priority order:
//!
//! 1. `{"fulltext_search": {"results": [...]}, "vector_search": {"results": [...]}}`
//! 2. `{"fts_results": [...], "vector_results": [...]}`, consulted for each
//!    side that (1) did not supply
//! 3. `{"results": [...]}`, a combined hybrid list split per item, used only
//!    when neither side was supplied by (1) or (2)
//!
//! An optional `"query"` is carried through. Items without a usable id are
//! skipped and counted; they never fail the request.

use crate::candidate::{LexicalHit, RankedCandidate, VectorHit};
use crate::hybrid::{HybridReranker, RerankExplanation, Reranker};
use ranklab_core::{Error, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Typed inputs extracted from a JSON request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RerankPayload {
    /// Query text, when the request carried one
    pub query: Option<String>,
    /// Lexical result list
    pub lexical: Vec<LexicalHit>,
    /// Vector result list
    pub vector: Vec<VectorHit>,
    /// Items dropped for lack of a usable id
    pub skipped: usize,
}

impl RerankPayload {
    /// Parse a JSON request
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`] if the root is not a JSON object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| {
            Error::InvalidPayload(format!("expected a JSON object, got {}", kind_of(value)))
        })?;

        let mut lexical_items = wrapped_results(root, "fulltext_search")
            .or_else(|| raw_results(root, "fts_results"));
        let mut vector_items = wrapped_results(root, "vector_search")
            .or_else(|| raw_results(root, "vector_results"));

        if lexical_items.is_none() && vector_items.is_none() {
            if let Some(combined) = raw_results(root, "results") {
                let (l, v) = split_hybrid(combined);
                lexical_items = Some(l);
                vector_items = Some(v);
            }
        }

        let mut payload = RerankPayload {
            query: root.get("query").and_then(query_text),
            ..Default::default()
        };

        for item in lexical_items.unwrap_or_default() {
            match LexicalHit::from_json(item) {
                Some(hit) => payload.lexical.push(hit),
                None => payload.skip("lexical", item),
            }
        }
        for item in vector_items.unwrap_or_default() {
            match VectorHit::from_json(item) {
                Some(hit) => payload.vector.push(hit),
                None => payload.skip("vector", item),
            }
        }

        debug!(
            lexical = payload.lexical.len(),
            vector = payload.vector.len(),
            skipped = payload.skipped,
            has_query = payload.query.is_some(),
            "rerank payload parsed"
        );

        Ok(payload)
    }

    /// Parse a JSON request from text
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] for malformed JSON and
    /// [`Error::InvalidPayload`] if the root is not an object.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Whether both lists are empty
    pub fn is_empty(&self) -> bool {
        self.lexical.is_empty() && self.vector.is_empty()
    }

    /// Re-rank with the default reranker
    pub fn rerank(&self) -> Vec<RankedCandidate> {
        HybridReranker.rerank(&self.lexical, &self.vector)
    }

    /// Re-rank with the default reranker, keeping the calculation trace
    pub fn rerank_explained(&self) -> RerankExplanation {
        HybridReranker.rerank_explained(&self.lexical, &self.vector)
    }

    fn skip(&mut self, side: &str, item: &Value) {
        self.skipped += 1;
        warn!(side, item = %item, "skipping re-rank item without a usable document id");
    }
}

/// `{"<key>": {"results": [...]}}`
///
/// A present, non-empty wrapper counts as supplied even if it has no usable
/// `results` list.
fn wrapped_results<'a>(root: &'a Map<String, Value>, key: &str) -> Option<Vec<&'a Value>> {
    let wrapper = root.get(key)?.as_object().filter(|o| !o.is_empty())?;
    Some(
        wrapper
            .get("results")
            .and_then(Value::as_array)
            .map(|items| items.iter().collect())
            .unwrap_or_default(),
    )
}

/// `{"<key>": [...]}`
fn raw_results<'a>(root: &'a Map<String, Value>, key: &str) -> Option<Vec<&'a Value>> {
    root.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().collect())
}

/// Split a combined hybrid list into lexical and vector items
///
/// `search_method` decides when it is `"fulltext"` or `"vector"`. Otherwise
/// an item with only a relevance score is lexical, one with only a similarity
/// score is vector, and anything else goes to both.
fn split_hybrid(items: Vec<&Value>) -> (Vec<&Value>, Vec<&Value>) {
    let mut lexical = Vec::new();
    let mut vector = Vec::new();

    for item in items {
        let has = |field: &str| item.get(field).is_some_and(|v| !v.is_null());
        match item.get("search_method").and_then(Value::as_str) {
            Some("fulltext") => lexical.push(item),
            Some("vector") => vector.push(item),
            _ if has("relevance_score") && !has("similarity_score") => lexical.push(item),
            _ if has("similarity_score") && !has("relevance_score") => vector.push(item),
            _ => {
                lexical.push(item);
                vector.push(item);
            }
        }
    }

    debug!(
        lexical = lexical.len(),
        vector = vector.len(),
        "hybrid results split"
    );
    (lexical, vector)
}

fn query_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
