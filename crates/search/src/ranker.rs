//! Corpus ranking
//!
//! [`Ranker`] scores every document of a [`Corpus`] against a query, sorts
//! descending by score, optionally drops non-matching documents, and
//! optionally truncates.
//!
//! # Ordering
//!
//! The sort is stable: documents with equal scores keep corpus order, so two
//! identical calls return identical lists. The limit is applied only after
//! sorting (and filtering), so it always keeps the true top-k.
//!
//! # Matching-only mode
//!
//! A document matches when at least one query term occurs in it (tf > 0).
//! A matching document may still have a score <= 0 when all its matched
//! terms have negative IDF; it is kept.

use crate::corpus::Corpus;
use crate::scorer::{Bm25Scorer, Scorer};
use crate::tokenizer::tokenize_unique_with;
use ranklab_core::{ScoredResult, SearchOptions};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Corpus ranker
///
/// Stateless apart from its options and scorer; one ranker can serve
/// concurrent searches over any number of corpora.
#[derive(Clone)]
pub struct Ranker {
    /// Scorer applied to each document
    scorer: Arc<dyn Scorer>,
    /// Selection mode and limit
    options: SearchOptions,
}

impl Ranker {
    /// Create a ranker using BM25 with `options.params`
    pub fn new(options: SearchOptions) -> Self {
        Ranker {
            scorer: Arc::new(Bm25Scorer::new(options.params)),
            options,
        }
    }

    /// Builder: set custom scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Ranking options
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Rank the corpus against `query`
    ///
    /// The query is tokenized with the corpus rule and deduplicated.
    pub fn search(&self, query: &str, corpus: &Corpus) -> Vec<ScoredResult> {
        let query_terms = tokenize_unique_with(corpus.tokenization(), query);
        let stats = corpus.stats();

        let mut results: Vec<ScoredResult> = corpus
            .entries()
            .filter_map(|(doc, terms)| {
                let scored = self.scorer.score_terms(&query_terms, terms, stats);
                if self.options.matches_only && scored.matched_terms == 0 {
                    return None;
                }
                Some(ScoredResult {
                    document_id: doc.id.clone(),
                    document: self.options.include_text.then(|| doc.text.clone()),
                    score: scored.total,
                    matched_terms: scored.matched_terms,
                    details: scored.details,
                })
            })
            .collect();

        let candidates = results.len();

        // Stable; equal scores keep corpus order
        results.sort_by(|a, b| descending(a.score, b.score));

        if self.options.limit > 0 {
            results.truncate(self.options.limit);
        }

        debug!(
            scorer = self.scorer.name(),
            query_terms = query_terms.len(),
            corpus_size = corpus.len(),
            candidates,
            returned = results.len(),
            matches_only = self.options.matches_only,
            "ranked corpus"
        );

        results
    }
}

impl std::fmt::Debug for Ranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker")
            .field("scorer", &self.scorer.name())
            .field("options", &self.options)
            .finish()
    }
}

/// Descending total order in which -0.0 and +0.0 are equal
///
/// NaN scores from degenerate params sort first.
fn descending(a: f64, b: f64) -> Ordering {
    (b + 0.0).total_cmp(&(a + 0.0))
}

/// Rank `corpus` against `query` with BM25
pub fn search(query: &str, corpus: &Corpus, options: &SearchOptions) -> Vec<ScoredResult> {
    Ranker::new(*options).search(query, corpus)
}

// ============================================================================
// Tests
// ============================================================================
