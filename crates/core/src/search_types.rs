//! Core search types
//!
//! This module defines the records exchanged between the ranking engine and
//! its callers:
//! - Tokenization: engine-wide tokenization policy
//! - IdfSmoothing / Bm25Params: scoring tunables
//! - SearchOptions: ranker selection mode and limit
//! - TermScoreBreakdown: per-term score components
//! - ScoredResult: one ranked document
//! - ScoreExplanation: breakdown of a single document's score
//!
//! All output records serialize to JSON for an HTTP boundary.

use crate::error::{Error, Result};
use crate::types::DocumentId;
use serde::{Deserialize, Serialize};

// ============================================================================
// Tokenization
// ============================================================================

/// Tokenization policy
///
/// A corpus is built and scored with exactly one policy. The two rules
/// produce different term sets for punctuated text ("cake." vs "cake"), so
/// mixing them between statistics and scoring would corrupt df lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokenization {
    /// Lower-case, split on runs of whitespace; punctuation stays attached
    #[default]
    Whitespace,
    /// Lower-case Unicode words (UAX#29 boundaries); punctuation dropped
    Words,
}

// ============================================================================
// Bm25Params
// ============================================================================

/// IDF formula variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfSmoothing {
    /// Robertson/Sparck-Jones: `ln((N - df + 0.5) / (df + 0.5))`
    ///
    /// Negative for terms in more than half the corpus.
    #[default]
    Standard,
    /// Lucene-style: `ln((N - df + 0.5) / (df + 0.5) + 1)`
    ///
    /// Never negative.
    PlusOne,
}

/// BM25 tunables
///
/// Values are used as given. Negative `k1` or `b` outside `[0, 1]` produce
/// mathematically consistent but unusual scores; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    /// Term-frequency saturation (default 1.5)
    pub k1: f64,
    /// Length normalization strength (default 0.75)
    pub b: f64,
    /// IDF formula variant (default standard)
    #[serde(default)]
    pub idf_smoothing: IdfSmoothing,
}

/// Default `k1`
pub const DEFAULT_K1: f64 = 1.5;
/// Default `b`
pub const DEFAULT_B: f64 = 0.75;

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
            idf_smoothing: IdfSmoothing::Standard,
        }
    }
}

impl Bm25Params {
    /// Create params with custom `k1` and `b` and standard IDF
    pub fn new(k1: f64, b: f64) -> Self {
        Bm25Params {
            k1,
            b,
            idf_smoothing: IdfSmoothing::Standard,
        }
    }

    /// Builder: set IDF smoothing
    pub fn with_idf_smoothing(mut self, smoothing: IdfSmoothing) -> Self {
        self.idf_smoothing = smoothing;
        self
    }

    /// Reject values that cannot produce a score at all.
    ///
    /// Out-of-range but finite values are accepted as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `k1` or `b` is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() {
            return Err(Error::Config(format!("k1 must be finite, got {}", self.k1)));
        }
        if !self.b.is_finite() {
            return Err(Error::Config(format!("b must be finite, got {}", self.b)));
        }
        Ok(())
    }
}

// ============================================================================
// SearchOptions
// ============================================================================

/// Options for ranking a corpus
///
/// # Examples
///
/// ```
/// use ranklab_core::SearchOptions;
///
/// let opts = SearchOptions::new().with_limit(5).matches_only(true);
/// assert_eq!(opts.limit, 5);
/// assert!(opts.matches_only);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Scoring tunables
    pub params: Bm25Params,
    /// Maximum results after sorting; 0 means unlimited
    pub limit: usize,
    /// Drop documents in which no query term occurs
    pub matches_only: bool,
    /// Copy the raw document text onto each result
    pub include_text: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            params: Bm25Params::default(),
            limit: 0,
            matches_only: false,
            include_text: true,
        }
    }
}

impl SearchOptions {
    /// Create options with defaults: all results, unlimited, text included
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set scoring params
    pub fn with_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// Builder: set result limit (0 = unlimited)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder: toggle matching-only mode
    pub fn matches_only(mut self, enabled: bool) -> Self {
        self.matches_only = enabled;
        self
    }

    /// Builder: toggle text pass-through
    pub fn with_text(mut self, enabled: bool) -> Self {
        self.include_text = enabled;
        self
    }
}

// ============================================================================
// TermScoreBreakdown
// ============================================================================

/// Score components for one query term against one document
///
/// Recorded for every query term, matched or not. An unmatched term has
/// `found == false`, `term_frequency == 0`, and `term_score == 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermScoreBreakdown {
    /// Query term
    pub term: String,
    /// Occurrences in the document
    pub term_frequency: usize,
    /// Documents in the corpus containing the term
    pub document_frequency: usize,
    /// Inverse document frequency
    pub idf: f64,
    /// `tf * (k1 + 1)`
    pub numerator: f64,
    /// `tf + k1 * length_norm`
    pub denominator: f64,
    /// `idf * numerator / denominator`, or 0 when unmatched
    pub term_score: f64,
    /// Token count of the document
    pub document_length: usize,
    /// Whether the term occurs in the document
    pub found: bool,
}

impl TermScoreBreakdown {
    /// Saturated term-frequency component (`numerator / denominator`)
    pub fn tf_component(&self) -> f64 {
        if self.denominator == 0.0 {
            0.0
        } else {
            self.numerator / self.denominator
        }
    }
}

// ============================================================================
// ScoredResult
// ============================================================================

/// One document in a ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Document identifier
    pub document_id: DocumentId,
    /// Raw document text, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// BM25 score (may be negative)
    pub score: f64,
    /// Distinct query terms present in the document
    pub matched_terms: usize,
    /// Per-term breakdown, in query term order
    pub details: Vec<TermScoreBreakdown>,
}

impl ScoredResult {
    /// Whether at least one query term occurs in the document
    pub fn is_match(&self) -> bool {
        self.matched_terms > 0
    }
}

// ============================================================================
// ScoreExplanation
// ============================================================================

/// Breakdown of a single document's score for diagnostic display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreExplanation {
    /// Query as given
    pub query: String,
    /// Explained document
    pub document_id: DocumentId,
    /// Token count of the document
    pub document_length: usize,
    /// Corpus average token count
    pub average_document_length: f64,
    /// Sum of term scores
    pub total_score: f64,
    /// Per-term breakdown, in query term order
    pub terms: Vec<TermScoreBreakdown>,
}
