//! Re-rank calculation trace
//!
//! Each [`CalculationStep`] serializes as an object whose `step` field names
//! the stage, followed by the stage's data and a human-readable description.

use crate::candidate::{LexicalHit, MergedCandidate, Metadata, RankedCandidate, VectorHit};
use ranklab_core::DocumentId;
use serde::Serialize;

/// A merged candidate with its normalized components
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    /// Merged entry
    #[serde(flatten)]
    pub candidate: MergedCandidate,
    /// relevance / max_relevance
    pub normalized_relevance: f64,
    /// similarity / max_similarity
    pub normalized_similarity: f64,
    /// Sum of both normalized components
    pub combined_score: f64,
}

/// Normalization detail for one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedCandidate {
    /// Document identifier
    pub document_id: DocumentId,
    /// Lexical score as supplied
    pub relevance_score: f64,
    /// Vector score as supplied
    pub similarity_score: f64,
    /// relevance / max_relevance
    pub normalized_relevance: f64,
    /// similarity / max_similarity
    pub normalized_similarity: f64,
    /// Sum of both normalized components
    pub combined_score: f64,
    /// `"relevance / max = normalized"`, 4 decimals
    pub relevance_expression: String,
    /// `"similarity / max = normalized"`, 4 decimals
    pub similarity_expression: String,
    /// `"relevance + similarity = combined"`, 4 decimals
    pub combined_expression: String,
    /// Pass-through fields
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl NormalizedCandidate {
    pub(crate) fn new(scored: &ScoredCandidate, max_relevance: f64, max_similarity: f64) -> Self {
        let c = &scored.candidate;
        NormalizedCandidate {
            document_id: c.document_id.clone(),
            relevance_score: c.relevance_score,
            similarity_score: c.similarity_score,
            normalized_relevance: scored.normalized_relevance,
            normalized_similarity: scored.normalized_similarity,
            combined_score: scored.combined_score,
            relevance_expression: format!(
                "{:.4} / {:.4} = {:.4}",
                c.relevance_score, max_relevance, scored.normalized_relevance
            ),
            similarity_expression: format!(
                "{:.4} / {:.4} = {:.4}",
                c.similarity_score, max_similarity, scored.normalized_similarity
            ),
            combined_expression: format!(
                "{:.4} + {:.4} = {:.4}",
                scored.normalized_relevance, scored.normalized_similarity, scored.combined_score
            ),
            metadata: c.metadata.clone(),
        }
    }
}

/// Stage-specific data of a calculation step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step")]
pub enum StepDetail {
    /// Inputs as received
    #[serde(rename = "Input Data")]
    InputData {
        /// Lexical list
        lexical_results: Vec<LexicalHit>,
        /// Vector list
        vector_results: Vec<VectorHit>,
    },

    /// Normalization maxima
    #[serde(rename = "Max Scores Calculation")]
    MaxScores {
        /// Largest positive relevance, or 1
        max_relevance: f64,
        /// Largest positive similarity, or 1
        max_similarity: f64,
    },

    /// Merged entries in first-seen order
    #[serde(rename = "Merge Results")]
    Merge {
        /// One entry per document id
        merged_items: Vec<MergedCandidate>,
    },

    /// Per-candidate normalization, in merge order
    #[serde(rename = "Normalization and Combined Score")]
    Normalization {
        /// Normalized components of each entry
        normalized_items: Vec<NormalizedCandidate>,
    },

    /// Entries ordered by combined score
    #[serde(rename = "Sorting")]
    Sorting {
        /// Entries with combined scores, descending
        sorted_items: Vec<ScoredCandidate>,
    },

    /// Output with positions
    #[serde(rename = "Final Positions")]
    FinalPositions {
        /// Final results
        final_results: Vec<RankedCandidate>,
    },
}

/// One named step of a re-rank trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationStep {
    /// Stage data, including the `step` name
    #[serde(flatten)]
    pub detail: StepDetail,
    /// What the stage did
    pub description: &'static str,
}

impl CalculationStep {
    fn new(detail: StepDetail) -> Self {
        let description = match &detail {
            StepDetail::InputData { .. } => "Received lexical and vector search results.",
            StepDetail::MaxScores { .. } => {
                "Found the maximum relevance score of the lexical results and the maximum \
                 similarity score of the vector results for normalization."
            }
            StepDetail::Merge { .. } => {
                "Merged lexical and vector results by document id, combining scores for shared ids."
            }
            StepDetail::Normalization { .. } => {
                "Divided relevance and similarity by their maxima, then summed the normalized \
                 values into the combined score."
            }
            StepDetail::Sorting { .. } => "Sorted results by combined score in descending order.",
            StepDetail::FinalPositions { .. } => {
                "Assigned positions in sorted order and dropped the combined score."
            }
        };
        CalculationStep {
            detail,
            description,
        }
    }

    pub(crate) fn input_data(lexical: &[LexicalHit], vector: &[VectorHit]) -> Self {
        Self::new(StepDetail::InputData {
            lexical_results: lexical.to_vec(),
            vector_results: vector.to_vec(),
        })
    }

    pub(crate) fn max_scores(max_relevance: f64, max_similarity: f64) -> Self {
        Self::new(StepDetail::MaxScores {
            max_relevance,
            max_similarity,
        })
    }

    pub(crate) fn merge(merged_items: Vec<MergedCandidate>) -> Self {
        Self::new(StepDetail::Merge { merged_items })
    }

    pub(crate) fn normalization(normalized_items: Vec<NormalizedCandidate>) -> Self {
        Self::new(StepDetail::Normalization { normalized_items })
    }

    pub(crate) fn sorting(sorted_items: Vec<ScoredCandidate>) -> Self {
        Self::new(StepDetail::Sorting { sorted_items })
    }

    pub(crate) fn final_positions(final_results: Vec<RankedCandidate>) -> Self {
        Self::new(StepDetail::FinalPositions { final_results })
    }

    /// Stage name, as serialized in the `step` field
    pub fn name(&self) -> &'static str {
        match self.detail {
            StepDetail::InputData { .. } => "Input Data",
            StepDetail::MaxScores { .. } => "Max Scores Calculation",
            StepDetail::Merge { .. } => "Merge Results",
            StepDetail::Normalization { .. } => "Normalization and Combined Score",
            StepDetail::Sorting { .. } => "Sorting",
            StepDetail::FinalPositions { .. } => "Final Positions",
        }
    }
}
