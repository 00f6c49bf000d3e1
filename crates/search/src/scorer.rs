//! Scoring infrastructure
//!
//! This module provides:
//! - DocumentTerms: term counts and length of one tokenized document
//! - DocumentScore: total score plus per-term breakdown
//! - Scorer trait for pluggable scoring algorithms
//! - Bm25Scorer default implementation

use crate::stats::CorpusStatistics;
use crate::tokenizer::{dedup_terms, tokenize_with};
use ranklab_core::{Bm25Params, TermScoreBreakdown, Tokenization};
use std::collections::HashMap;

// ============================================================================
// DocumentTerms
// ============================================================================

/// Term frequencies and token count of a document
///
/// Built once per document so that ranking a corpus does not re-tokenize it
/// for every query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentTerms {
    /// Token count (|D|)
    length: usize,
    /// Occurrences per term
    frequencies: HashMap<String, usize>,
}

impl DocumentTerms {
    /// Create from explicit counts
    ///
    /// `length` is taken as given; it may exceed the sum of `frequencies`
    /// when the caller only tracks the terms it cares about.
    pub fn new(frequencies: HashMap<String, usize>, length: usize) -> Self {
        DocumentTerms {
            length,
            frequencies,
        }
    }

    /// Count terms in a token sequence
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *frequencies.entry(token.clone()).or_insert(0) += 1;
        }
        DocumentTerms {
            length: tokens.len(),
            frequencies,
        }
    }

    /// Tokenize and count a text
    pub fn from_text(text: &str, tokenization: Tokenization) -> Self {
        Self::from_tokens(&tokenize_with(tokenization, text))
    }

    /// Token count
    pub fn length(&self) -> usize {
        self.length
    }

    /// Occurrences of `term` (0 if absent)
    pub fn term_frequency(&self, term: &str) -> usize {
        self.frequencies.get(term).copied().unwrap_or(0)
    }

    /// Whether `term` occurs at least once
    pub fn contains(&self, term: &str) -> bool {
        self.term_frequency(term) > 0
    }
}

// ============================================================================
// DocumentScore
// ============================================================================

/// Score of one document against one query
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentScore {
    /// Sum of term scores
    pub total: f64,
    /// Distinct query terms with tf > 0
    pub matched_terms: usize,
    /// One entry per distinct query term, in query order
    pub details: Vec<TermScoreBreakdown>,
}

impl DocumentScore {
    /// Score of an empty query
    pub fn zero() -> Self {
        DocumentScore {
            total: 0.0,
            matched_terms: 0,
            details: vec![],
        }
    }
}

// ============================================================================
// Scorer Trait
// ============================================================================

/// Pluggable scoring interface
///
/// Scorers take query terms and a counted document and return a relevance
/// score with its breakdown. Higher scores indicate more relevant documents.
///
/// # Thread Safety
///
/// Scorers must be Send + Sync so one scorer can serve concurrent searches.
pub trait Scorer: Send + Sync {
    /// Score a document against query terms
    ///
    /// Query terms are deduplicated before scoring; repeating a term does
    /// not change the result.
    fn score_terms(
        &self,
        query_terms: &[String],
        doc: &DocumentTerms,
        stats: &CorpusStatistics,
    ) -> DocumentScore;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

// ============================================================================
// Bm25Scorer
// ============================================================================

/// Okapi BM25 scorer
///
/// # BM25 Formula
///
/// For each distinct query term t:
/// score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))
///
/// Where:
/// - tf = term frequency in document
/// - dl = document length
/// - avgdl = average document length
/// - k1 = term saturation parameter (default 1.5)
/// - b = length normalization parameter (default 0.75)
///
/// A term with tf = 0 contributes exactly 0, even when its IDF is negative.
#[derive(Debug, Clone, Default)]
pub struct Bm25Scorer {
    params: Bm25Params,
}

impl Bm25Scorer {
    /// Create a scorer with the given params
    pub fn new(params: Bm25Params) -> Self {
        Bm25Scorer { params }
    }

    /// Scoring params
    pub fn params(&self) -> &Bm25Params {
        &self.params
    }

    /// Score raw document text against query terms
    ///
    /// The text is tokenized with the rule the statistics were built with.
    pub fn score(
        &self,
        query_terms: &[String],
        document_text: &str,
        stats: &CorpusStatistics,
    ) -> DocumentScore {
        let doc = DocumentTerms::from_text(document_text, stats.tokenization());
        self.score_terms(query_terms, &doc, stats)
    }

    /// Breakdown for a single term
    pub fn term_breakdown(
        &self,
        term: &str,
        doc: &DocumentTerms,
        stats: &CorpusStatistics,
    ) -> TermScoreBreakdown {
        let length_norm = stats.length_norm(doc.length(), self.params.b);
        self.breakdown_with_norm(term, doc, stats, length_norm)
    }

    fn breakdown_with_norm(
        &self,
        term: &str,
        doc: &DocumentTerms,
        stats: &CorpusStatistics,
        length_norm: f64,
    ) -> TermScoreBreakdown {
        let k1 = self.params.k1;
        let term_frequency = doc.term_frequency(term);
        let tf = term_frequency as f64;

        let idf = stats.idf(term, self.params.idf_smoothing);
        let numerator = tf * (k1 + 1.0);
        let denominator = tf + k1 * length_norm;
        let term_score = if term_frequency == 0 {
            0.0
        } else {
            idf * numerator / denominator
        };

        TermScoreBreakdown {
            term: term.to_string(),
            term_frequency,
            document_frequency: stats.document_frequency(term),
            idf,
            numerator,
            denominator,
            term_score,
            document_length: doc.length(),
            found: term_frequency > 0,
        }
    }
}

impl Scorer for Bm25Scorer {
    fn score_terms(
        &self,
        query_terms: &[String],
        doc: &DocumentTerms,
        stats: &CorpusStatistics,
    ) -> DocumentScore {
        let terms = dedup_terms(query_terms.iter().map(String::as_str));
        if terms.is_empty() {
            return DocumentScore::zero();
        }

        let length_norm = stats.length_norm(doc.length(), self.params.b);
        let details: Vec<TermScoreBreakdown> = terms
            .iter()
            .map(|term| self.breakdown_with_norm(term, doc, stats, length_norm))
            .collect();

        DocumentScore {
            total: details.iter().map(|d| d.term_score).sum(),
            matched_terms: details.iter().filter(|d| d.found).count(),
            details,
        }
    }

    fn name(&self) -> &str {
        "bm25"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ranklab_core::IdfSmoothing;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn recipe_stats() -> CorpusStatistics {
        let mut df = HashMap::new();
        df.insert("chocolate".to_string(), 30);
        df.insert("cake".to_string(), 40);
        CorpusStatistics::from_parts(100, 50.0, df, Tokenization::Whitespace).unwrap()
    }

    fn recipe_doc() -> DocumentTerms {
        let mut freqs = HashMap::new();
        freqs.insert("chocolate".to_string(), 2);
        freqs.insert("cake".to_string(), 2);
        DocumentTerms::new(freqs, 14)
    }

    // ========================================
    // DocumentTerms Tests
    // ========================================

    #[test]
    fn test_document_terms_from_text() {
        let doc = DocumentTerms::from_text("Cake cake pie", Tokenization::Whitespace);
        assert_eq!(doc.length(), 3);
        assert_eq!(doc.term_frequency("cake"), 2);
        assert_eq!(doc.term_frequency("pie"), 1);
        assert!(!doc.contains("tart"));
    }

    // ========================================
    // Bm25Scorer Tests
    // ========================================

    #[test]
    fn test_bm25_recipe_example() {
        let scorer = Bm25Scorer::default();
        let result =
            scorer.score_terms(&terms(&["chocolate", "cake"]), &recipe_doc(), &recipe_stats());

        assert!((result.details[0].idf - 0.838).abs() < 1e-3);
        assert!((result.details[1].idf - 0.401).abs() < 1e-3);
        for d in &result.details {
            assert!((d.tf_component() - 1.859).abs() < 1e-3);
            assert_eq!(d.document_length, 14);
        }
        assert!((result.total - 2.303).abs() < 0.01);
        assert_eq!(result.matched_terms, 2);
    }

    #[test]
    fn test_bm25_breakdown_components() {
        let scorer = Bm25Scorer::default();
        let d = scorer.term_breakdown("chocolate", &recipe_doc(), &recipe_stats());
        assert_eq!(d.term_frequency, 2);
        assert_eq!(d.document_frequency, 30);
        assert!((d.numerator - 5.0).abs() < 1e-12);
        assert!((d.denominator - 2.69).abs() < 1e-12);
        assert!((d.term_score - d.idf * d.numerator / d.denominator).abs() < 1e-12);
        assert!(d.found);
    }

    #[test]
    fn test_bm25_missing_term_recorded() {
        let scorer = Bm25Scorer::default();
        let result = scorer.score_terms(
            &terms(&["chocolate", "vanilla"]),
            &recipe_doc(),
            &recipe_stats(),
        );
        assert_eq!(result.details.len(), 2);
        let vanilla = &result.details[1];
        assert_eq!(vanilla.term, "vanilla");
        assert_eq!(vanilla.term_frequency, 0);
        assert_eq!(vanilla.term_score, 0.0);
        assert!(!vanilla.found);
        assert_eq!(result.matched_terms, 1);
    }

    #[test]
    fn test_bm25_zero_tf_with_negative_idf_is_zero() {
        let mut df = HashMap::new();
        df.insert("common".to_string(), 90);
        let stats = CorpusStatistics::from_parts(100, 10.0, df, Tokenization::Whitespace).unwrap();
        let doc = DocumentTerms::from_text("rare words only", Tokenization::Whitespace);

        let result = Bm25Scorer::default().score_terms(&terms(&["common"]), &doc, &stats);
        assert!(result.details[0].idf < 0.0);
        assert_eq!(result.details[0].term_score, 0.0);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_bm25_negative_contribution_for_common_match() {
        let mut df = HashMap::new();
        df.insert("common".to_string(), 90);
        let stats = CorpusStatistics::from_parts(100, 3.0, df, Tokenization::Whitespace).unwrap();
        let doc = DocumentTerms::from_text("common words here", Tokenization::Whitespace);

        let result = Bm25Scorer::default().score_terms(&terms(&["common"]), &doc, &stats);
        assert!(result.total < 0.0);
        assert_eq!(result.matched_terms, 1);
    }

    #[test]
    fn test_bm25_empty_query() {
        let result = Bm25Scorer::default().score_terms(&[], &recipe_doc(), &recipe_stats());
        assert_eq!(result.total, 0.0);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_bm25_duplicate_query_terms() {
        let scorer = Bm25Scorer::default();
        let once = scorer.score_terms(&terms(&["cake"]), &recipe_doc(), &recipe_stats());
        let twice = scorer.score_terms(&terms(&["cake", "cake"]), &recipe_doc(), &recipe_stats());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_bm25_term_order_does_not_change_total() {
        let scorer = Bm25Scorer::default();
        let a = scorer.score_terms(&terms(&["cake", "chocolate"]), &recipe_doc(), &recipe_stats());
        let b = scorer.score_terms(&terms(&["chocolate", "cake"]), &recipe_doc(), &recipe_stats());
        assert!((a.total - b.total).abs() < 1e-12);
    }

    #[test]
    fn test_bm25_empty_corpus_scores_zero() {
        let stats = CorpusStatistics::empty(Tokenization::Whitespace);
        let result = Bm25Scorer::default().score(&terms(&["cake"]), "cake cake", &stats);
        assert_eq!(result.total, 0.0);
        assert!(result.total.is_finite());
    }

    #[test]
    fn test_bm25_plus_one_smoothing() {
        let scorer =
            Bm25Scorer::new(Bm25Params::default().with_idf_smoothing(IdfSmoothing::PlusOne));
        let d = scorer.term_breakdown("cake", &recipe_doc(), &recipe_stats());
        assert!((d.idf - (60.5f64 / 40.5 + 1.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_bm25_b_zero_ignores_length() {
        let scorer = Bm25Scorer::new(Bm25Params::new(1.5, 0.0));
        let stats = recipe_stats();
        let short = DocumentTerms::new(recipe_doc().frequencies.clone(), 5);
        let long = DocumentTerms::new(recipe_doc().frequencies.clone(), 500);
        let a = scorer.score_terms(&terms(&["cake"]), &short, &stats);
        let b = scorer.score_terms(&terms(&["cake"]), &long, &stats);
        assert!((a.total - b.total).abs() < 1e-12);
    }

    #[test]
    fn test_bm25_score_uses_stats_tokenization() {
        let stats = CorpusStatistics::from_texts(["cake.", "pie"], Tokenization::Words);
        let result = Bm25Scorer::default().score(&terms(&["cake"]), "Cake!", &stats);
        assert_eq!(result.matched_terms, 1);
    }

    #[test]
    fn test_bm25_name() {
        assert_eq!(Bm25Scorer::default().name(), "bm25");
    }

    #[test]
    fn test_bm25_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bm25Scorer>();
    }
}
