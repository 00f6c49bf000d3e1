//! BM25 ranking scenarios over the recipe corpus.

use crate::fixtures::{recipe_documents, recipes, recipes_with};
use ranklab::{
    search, Bm25Params, Bm25Scorer, CorpusStatistics, DocumentId, DocumentTerms, Error,
    IdfSmoothing, Scorer, SearchOptions, Tokenization,
};
use std::collections::HashMap;

fn ids(results: &[ranklab::ScoredResult]) -> Vec<DocumentId> {
    results.iter().map(|r| r.document_id.clone()).collect()
}

// ============================================================================
// Worked example
// ============================================================================

#[test]
fn worked_example_from_external_statistics() {
    let mut df = HashMap::new();
    df.insert("chocolate".to_string(), 30);
    df.insert("cake".to_string(), 40);
    let stats = CorpusStatistics::from_parts(100, 50.0, df, Tokenization::Whitespace).unwrap();

    let mut tf = HashMap::new();
    tf.insert("chocolate".to_string(), 2);
    tf.insert("cake".to_string(), 2);
    let doc = DocumentTerms::new(tf, 14);

    let query = ranklab::tokenize("chocolate cake");
    let score = Bm25Scorer::new(Bm25Params::default()).score_terms(&query, &doc, &stats);

    assert!((score.details[0].idf - 0.838).abs() < 0.01);
    assert!((score.details[1].idf - 0.401).abs() < 0.01);
    assert!((score.total - 2.303).abs() < 0.01);
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn every_document_is_ranked_by_default() {
    let corpus = recipes();
    let results = corpus.search("chocolate", &SearchOptions::default());
    assert_eq!(results.len(), corpus.len());
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn half_corpus_term_scores_zero_and_longer_documents_rank_lower() {
    let corpus = recipes();
    let results = corpus.search("chocolate", &SearchOptions::default().matches_only(true));
    // "chocolate" is in half the corpus, so its idf is ln(3.5/3.5) = 0
    assert!(results.iter().all(|r| r.score == 0.0));
    assert_eq!(ids(&results).len(), 3);

    let results = corpus.search("frosting", &SearchOptions::default().matches_only(true));
    assert_eq!(ids(&results), vec![DocumentId::Int(105), DocumentId::Int(101)]);
    assert!(results[0].score > results[1].score, "longer document is penalized");
}

#[test]
fn rare_term_dominates() {
    let corpus = recipes();
    let results = corpus.search("lemon cake", &SearchOptions::default().with_limit(1));
    assert_eq!(ids(&results), vec![DocumentId::Int(104)]);
}

#[test]
fn ties_keep_corpus_order() {
    let corpus = recipes();
    let results = corpus.search("nothing-matches", &SearchOptions::default());
    let expected: Vec<DocumentId> = recipe_documents().into_iter().map(|d| d.id).collect();
    assert_eq!(ids(&results), expected);
}

#[test]
fn word_tokenization_strips_punctuation() {
    let whitespace = recipes_with(Tokenization::Whitespace);
    let words = recipes_with(Tokenization::Words);

    let opts = SearchOptions::default().matches_only(true);
    assert!(whitespace.search("perfect", &opts).is_empty());
    assert_eq!(ids(&words.search("perfect", &opts)), vec![DocumentId::Int(101)]);
}

#[test]
fn plus_one_smoothing_changes_scores_not_membership() {
    let corpus = recipes();
    let standard = SearchOptions::default().matches_only(true);
    let plus_one = standard
        .with_params(Bm25Params::default().with_idf_smoothing(IdfSmoothing::PlusOne));

    let a = corpus.search("cake", &standard);
    let b = corpus.search("cake", &plus_one);
    assert_eq!(a.len(), b.len());
    assert!(b.iter().all(|r| r.score > 0.0));
}

#[test]
fn free_search_matches_corpus_search() {
    let corpus = recipes();
    let opts = SearchOptions::default().with_limit(3);
    assert_eq!(search("vanilla cake", &corpus, &opts), corpus.search("vanilla cake", &opts));
}

// ============================================================================
// Explanation
// ============================================================================

#[test]
fn explanation_agrees_with_ranked_score() {
    let corpus = recipes();
    let params = Bm25Params::default();
    let results = corpus.search("carrot frosting", &SearchOptions::default().with_params(params));

    for r in &results {
        let e = corpus.explain("carrot frosting", &r.document_id, &params).unwrap();
        assert!((e.total_score - r.score).abs() < 1e-12);
        assert_eq!(e.terms.len(), 2);
    }
}

#[test]
fn explanation_of_unknown_document_fails() {
    let corpus = recipes();
    let err = corpus
        .explain("cake", &DocumentId::Int(999), &Bm25Params::default())
        .unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound(_)));
}

#[test]
fn candidate_page_ranked_against_index_statistics() {
    let mut df = HashMap::new();
    df.insert("frosting".to_string(), 5);
    let stats = CorpusStatistics::from_parts(1000, 12.0, df, Tokenization::Whitespace).unwrap();

    let corpus = ranklab::Corpus::with_statistics(recipe_documents(), stats).unwrap();
    let results = corpus.search("frosting", &SearchOptions::default().matches_only(true));

    // df 5 of 1000 keeps the idf strongly positive, unlike the local df 2 of 6
    let expected_idf = ((1000.0 - 5.0 + 0.5) / 5.5f64).ln();
    assert_eq!(results.len(), 2);
    assert!((results[0].details[0].idf - expected_idf).abs() < 1e-12);
}
