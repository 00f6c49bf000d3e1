//! Retrieval Tests
//!
//! End-to-end tests across the workspace crates:
//! - BM25 ranking and explanation over realistic corpora
//! - Hybrid re-ranking from JSON payloads
//! - Lexical search feeding the re-ranker
//! - Configuration files driving search options
//! - Index rebuilds under concurrent readers

mod fixtures;

mod bm25_scenarios;
mod config_files;
mod hybrid_scenarios;
mod pipeline;
