//! Hybrid re-ranking for ranklab
//!
//! This crate provides:
//! - LexicalHit / VectorHit: typed inputs with pass-through metadata
//! - Reranker trait for pluggable merge strategies
//! - HybridReranker: max-normalized additive merge with 1-based positions
//! - CalculationStep: optional trace of every re-rank stage
//! - RerankPayload: intake of the accepted JSON request shapes
//!
//! # Usage
//!
//! ```
//! use ranklab_rerank::{rerank, LexicalHit, VectorHit};
//!
//! let lexical = vec![LexicalHit::new(1, 10.0), LexicalHit::new(2, 5.0)];
//! let vector = vec![VectorHit::new(2, 0.8), VectorHit::new(3, 0.4)];
//!
//! let results = rerank(&lexical, &vector);
//! let order: Vec<i64> = results.iter().filter_map(|r| r.document_id.as_int()).collect();
//! assert_eq!(order, vec![2, 1, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod hybrid;
pub mod payload;
pub mod steps;

// Re-export commonly used types
pub use candidate::{LexicalHit, MergedCandidate, Metadata, RankedCandidate, VectorHit};
pub use hybrid::{rerank, HybridReranker, RerankExplanation, Reranker};
pub use payload::RerankPayload;
pub use steps::{CalculationStep, NormalizedCandidate, ScoredCandidate, StepDetail};
