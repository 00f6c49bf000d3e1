//! ranklab - BM25 ranking and hybrid lexical/vector re-ranking
//!
//! ranklab scores a corpus of documents against a text query with Okapi
//! BM25, explains individual scores term by term, and merges lexical and
//! vector result lists into one ranking by max-normalized score sum.
//!
//! # Quick Start
//!
//! ```
//! use ranklab::{rerank, Corpus, Document, LexicalHit, SearchOptions, Tokenization, VectorHit};
//!
//! let corpus = Corpus::build(
//!     vec![
//!         Document::new(1, "chocolate cake with chocolate frosting"),
//!         Document::new(2, "vanilla sponge"),
//!     ],
//!     Tokenization::Whitespace,
//! )?;
//! let lexical: Vec<LexicalHit> = corpus
//!     .search("chocolate", &SearchOptions::default().matches_only(true))
//!     .into_iter()
//!     .map(|r| LexicalHit::new(r.document_id, r.score))
//!     .collect();
//!
//! let ranked = rerank(&lexical, &[VectorHit::new(2, 0.9)]);
//! assert_eq!(ranked.len(), 2);
//! # Ok::<(), ranklab::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `ranklab-core`: identifiers, parameters, result records, config, errors
//! - `ranklab-search`: tokenization, statistics, scoring, ranking, explanation
//! - `ranklab-rerank`: hybrid merge, calculation steps, JSON payload intake

pub use ranklab_core::{
    Bm25Params, Document, DocumentId, Error, IdfSmoothing, RankConfig, Result, ScoreExplanation,
    ScoredResult, SearchOptions, TermScoreBreakdown, Tokenization, CONFIG_FILE_NAME, DEFAULT_B,
    DEFAULT_K1,
};
pub use ranklab_rerank::{
    rerank, CalculationStep, HybridReranker, LexicalHit, RankedCandidate, RerankExplanation,
    RerankPayload, Reranker, StepDetail, VectorHit,
};
pub use ranklab_search::{
    search, tokenize, Bm25Scorer, Corpus, CorpusStatistics, DocumentTerms, Ranker,
    ScoreExplainer, Scorer, SearchIndex,
};
