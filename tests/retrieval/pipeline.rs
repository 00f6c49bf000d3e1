//! Lexical search feeding the re-ranker, and index rebuilds.

use crate::fixtures::{recipe_documents, recipes};
use ranklab::{
    rerank, Document, DocumentId, HybridReranker, LexicalHit, Reranker, SearchIndex,
    SearchOptions, Tokenization, VectorHit,
};
use std::sync::Arc;

#[test]
fn search_results_feed_hybrid_rerank() {
    let corpus = recipes();
    let lexical: Vec<LexicalHit> = corpus
        .search("frosting", &SearchOptions::default().matches_only(true))
        .into_iter()
        .map(|r| LexicalHit::new(r.document_id, r.score))
        .collect();
    assert_eq!(lexical.len(), 2);

    // vector side strongly prefers the mousse, which has no lexical match
    let vector = vec![VectorHit::new(106, 0.9), VectorHit::new(101, 0.3)];
    let results = rerank(&lexical, &vector);

    let ids: Vec<DocumentId> = results.iter().map(|r| r.document_id.clone()).collect();
    assert_eq!(results.len(), 3);
    assert!(ids.contains(&DocumentId::Int(106)));
    assert_eq!(results[0].position, 1);
    assert!(results.windows(2).all(|w| w[0].position < w[1].position));
}

#[test]
fn reranker_trait_object() {
    let reranker: Box<dyn Reranker> = Box::new(HybridReranker::new());
    assert_eq!(reranker.name(), "max_normalized");
    let results = reranker.rerank(&[LexicalHit::new("a", 1.0)], &[VectorHit::new("b", 1.0)]);
    assert_eq!(results.len(), 2);
}

#[test]
fn rebuild_while_searching() {
    let index = Arc::new(SearchIndex::build(recipe_documents(), Tokenization::Whitespace).unwrap());
    let before = index.version();

    std::thread::scope(|s| {
        for _ in 0..4 {
            let index = Arc::clone(&index);
            s.spawn(move || {
                for _ in 0..50 {
                    let results = index.search("cake", &SearchOptions::default());
                    // either the old six documents or the new two
                    assert!(results.len() == 6 || results.len() == 2);
                }
            });
        }
        index
            .rebuild(vec![Document::new(1, "cake"), Document::new(2, "pie")])
            .unwrap();
    });

    assert!(index.version() > before);
    assert_eq!(index.len(), 2);
}
