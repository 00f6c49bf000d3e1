//! Per-document score explanation
//!
//! [`ScoreExplainer`] reproduces the scorer's arithmetic for one document and
//! returns every intermediate value, for diagnostics and tuning.

use crate::corpus::Corpus;
use crate::scorer::{Bm25Scorer, Scorer};
use crate::tokenizer::tokenize_unique_with;
use ranklab_core::{Bm25Params, DocumentId, Error, Result, ScoreExplanation};
use tracing::debug;

/// Explains BM25 scores of individual documents
#[derive(Debug, Clone, Default)]
pub struct ScoreExplainer {
    scorer: Bm25Scorer,
}

impl ScoreExplainer {
    /// Create an explainer with the given params
    pub fn new(params: Bm25Params) -> Self {
        ScoreExplainer {
            scorer: Bm25Scorer::new(params),
        }
    }

    /// Explain how document `id` scores against `query`
    ///
    /// The total equals the score the ranker assigns the same document with
    /// the same params.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if `id` is not in the corpus.
    pub fn explain(
        &self,
        corpus: &Corpus,
        query: &str,
        id: &DocumentId,
    ) -> Result<ScoreExplanation> {
        let doc = corpus
            .terms_of(id)
            .ok_or_else(|| Error::DocumentNotFound(id.clone()))?;

        let query_terms = tokenize_unique_with(corpus.tokenization(), query);
        let scored = self.scorer.score_terms(&query_terms, doc, corpus.stats());

        debug!(
            document_id = %id,
            query_terms = query_terms.len(),
            matched_terms = scored.matched_terms,
            total = scored.total,
            "explained score"
        );

        Ok(ScoreExplanation {
            query: query.to_string(),
            document_id: id.clone(),
            document_length: doc.length(),
            average_document_length: corpus.stats().average_document_length(),
            total_score: scored.total,
            terms: scored.details,
        })
    }
}
