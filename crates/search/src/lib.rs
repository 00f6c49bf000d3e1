//! BM25 search for ranklab
//!
//! This crate provides:
//! - Tokenizer (whitespace or Unicode-word rules)
//! - CorpusStatistics for N, avgdl, and document frequency
//! - Scorer trait for pluggable scoring algorithms
//! - Bm25Scorer default implementation
//! - Ranker for scoring, sorting, filtering, and truncating a corpus
//! - ScoreExplainer for per-term breakdowns of one document
//! - Corpus (immutable compiled snapshot) and SearchIndex (swap-on-rebuild)
//!
//! # Usage
//!
//! ```
//! use ranklab_core::{Document, SearchOptions, Tokenization};
//! use ranklab_search::Corpus;
//!
//! let corpus = Corpus::build(
//!     vec![
//!         Document::new(1, "chocolate cake recipe"),
//!         Document::new(2, "lemon tart"),
//!     ],
//!     Tokenization::Whitespace,
//! )?;
//! let results = corpus.search("chocolate", &SearchOptions::default().matches_only(true));
//! assert_eq!(results.len(), 1);
//! # Ok::<(), ranklab_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod explain;
pub mod index;
pub mod ranker;
pub mod scorer;
pub mod stats;
pub mod tokenizer;

// Re-export commonly used types
pub use corpus::Corpus;
pub use explain::ScoreExplainer;
pub use index::SearchIndex;
pub use ranker::{search, Ranker};
pub use scorer::{Bm25Scorer, DocumentScore, DocumentTerms, Scorer};
pub use stats::CorpusStatistics;
pub use tokenizer::{tokenize, tokenize_unique, tokenize_with, tokenize_words};
