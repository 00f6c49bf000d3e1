//! Max-normalized hybrid re-ranking
//!
//! Merges a lexical result list and a vector result list into one ordering:
//!
//! 1. max_relevance / max_similarity: largest positive score of each family,
//!    or 1 when no score is positive
//! 2. merge by document id, seeded from the lexical list; vector items either
//!    insert a new entry (relevance 0) or overwrite the existing entry's
//!    similarity
//! 3. combined = relevance / max_relevance + similarity / max_similarity
//! 4. stable sort by combined, descending
//! 5. assign 1-based positions; combined is not part of the output
//!
//! A document found by only one method still gets that method's full
//! normalized contribution.

use crate::candidate::{LexicalHit, MergedCandidate, RankedCandidate, VectorHit};
use crate::steps::{CalculationStep, NormalizedCandidate, ScoredCandidate};
use ranklab_core::DocumentId;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

// ============================================================================
// Reranker Trait
// ============================================================================

/// Pluggable hybrid re-ranking interface
///
/// # Thread Safety
///
/// Rerankers must be Send + Sync for concurrent use.
pub trait Reranker: Send + Sync {
    /// Merge and order two result lists
    ///
    /// Every document id present in either list appears exactly once in the
    /// output, with positions `1..=N`.
    fn rerank(&self, lexical: &[LexicalHit], vector: &[VectorHit]) -> Vec<RankedCandidate>;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// RerankExplanation
// ============================================================================

/// Re-ranked results plus the trace that produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RerankExplanation {
    /// Final results, identical to [`Reranker::rerank`]
    pub results: Vec<RankedCandidate>,
    /// Calculation steps, in execution order
    pub steps: Vec<CalculationStep>,
}

// ============================================================================
// HybridReranker
// ============================================================================

/// Additive max-normalized re-ranker
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridReranker;

impl HybridReranker {
    /// Create a new HybridReranker
    pub fn new() -> Self {
        HybridReranker
    }

    /// Re-rank and record every intermediate step
    pub fn rerank_explained(
        &self,
        lexical: &[LexicalHit],
        vector: &[VectorHit],
    ) -> RerankExplanation {
        let mut steps = Vec::with_capacity(6);
        let results = self.run(lexical, vector, Some(&mut steps));
        RerankExplanation { results, steps }
    }

    fn run(
        &self,
        lexical: &[LexicalHit],
        vector: &[VectorHit],
        mut trace: Option<&mut Vec<CalculationStep>>,
    ) -> Vec<RankedCandidate> {
        if let Some(steps) = trace.as_deref_mut() {
            steps.push(CalculationStep::input_data(lexical, vector));
        }

        let max_relevance = max_positive(lexical.iter().map(|h| h.relevance_score));
        let max_similarity = max_positive(vector.iter().map(|h| h.similarity_score));

        debug!(
            lexical = lexical.len(),
            vector = vector.len(),
            max_relevance,
            max_similarity,
            "normalization maxima computed"
        );

        if let Some(steps) = trace.as_deref_mut() {
            steps.push(CalculationStep::max_scores(max_relevance, max_similarity));
        }

        let merged = merge(lexical, vector);

        if let Some(steps) = trace.as_deref_mut() {
            steps.push(CalculationStep::merge(merged.clone()));
        }

        let mut scored: Vec<ScoredCandidate> = merged
            .into_iter()
            .map(|candidate| {
                let normalized_relevance = candidate.relevance_score / max_relevance;
                let normalized_similarity = candidate.similarity_score / max_similarity;
                ScoredCandidate {
                    normalized_relevance,
                    normalized_similarity,
                    combined_score: normalized_relevance + normalized_similarity,
                    candidate,
                }
            })
            .collect();

        if let Some(steps) = trace.as_deref_mut() {
            let normalized = scored
                .iter()
                .map(|s| NormalizedCandidate::new(s, max_relevance, max_similarity))
                .collect();
            steps.push(CalculationStep::normalization(normalized));
        }

        // Stable; equal combined scores keep merge order. Adding 0.0 folds
        // -0.0 into +0.0 so signed zeros compare equal.
        scored.sort_by(|a, b| (b.combined_score + 0.0).total_cmp(&(a.combined_score + 0.0)));

        if let Some(steps) = trace.as_deref_mut() {
            steps.push(CalculationStep::sorting(scored.clone()));
        }

        let results: Vec<RankedCandidate> = scored
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankedCandidate::from_merged(s.candidate, i + 1))
            .collect();

        if let Some(steps) = trace {
            steps.push(CalculationStep::final_positions(results.clone()));
        }

        debug!(results = results.len(), "rerank complete");
        results
    }
}

impl Reranker for HybridReranker {
    fn rerank(&self, lexical: &[LexicalHit], vector: &[VectorHit]) -> Vec<RankedCandidate> {
        self.run(lexical, vector, None)
    }

    fn name(&self) -> &str {
        "max_normalized"
    }
}

/// Largest score strictly above 0, or 1 if there is none
fn max_positive(scores: impl Iterator<Item = f64>) -> f64 {
    let max = scores.fold(0.0, |max, s| if s > max { s } else { max });
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Merge both lists by id, in first-seen order
///
/// A repeated lexical id replaces the earlier entry but keeps its slot. A
/// vector id already present only overwrites the similarity score.
fn merge(lexical: &[LexicalHit], vector: &[VectorHit]) -> Vec<MergedCandidate> {
    let mut slots: HashMap<&DocumentId, usize> = HashMap::new();
    let mut merged: Vec<MergedCandidate> = Vec::with_capacity(lexical.len() + vector.len());

    for hit in lexical {
        let entry = MergedCandidate {
            document_id: hit.document_id.clone(),
            relevance_score: hit.relevance_score,
            similarity_score: 0.0,
            metadata: hit.metadata.clone(),
        };
        match slots.get(&hit.document_id) {
            Some(&i) => merged[i] = entry,
            None => {
                slots.insert(&hit.document_id, merged.len());
                merged.push(entry);
            }
        }
    }

    for hit in vector {
        match slots.get(&hit.document_id) {
            Some(&i) => merged[i].similarity_score = hit.similarity_score,
            None => {
                slots.insert(&hit.document_id, merged.len());
                merged.push(MergedCandidate {
                    document_id: hit.document_id.clone(),
                    relevance_score: 0.0,
                    similarity_score: hit.similarity_score,
                    metadata: hit.metadata.clone(),
                });
            }
        }
    }

    merged
}

/// Re-rank with the default [`HybridReranker`]
pub fn rerank(lexical: &[LexicalHit], vector: &[VectorHit]) -> Vec<RankedCandidate> {
    HybridReranker.rerank(lexical, vector)
}

// ============================================================================
// Tests
// ============================================================================
