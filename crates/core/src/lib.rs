//! Core types for ranklab
//!
//! This crate defines the foundational types used throughout the workspace:
//! - DocumentId / Document: what gets ranked
//! - Bm25Params / SearchOptions / Tokenization: how it gets ranked
//! - TermScoreBreakdown / ScoredResult / ScoreExplanation: ranking output
//! - RankConfig: `ranklab.toml` configuration
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod search_types;
pub mod types;

pub use config::{RankConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use search_types::{
    Bm25Params, IdfSmoothing, ScoreExplanation, ScoredResult, SearchOptions, TermScoreBreakdown,
    Tokenization, DEFAULT_B, DEFAULT_K1,
};
pub use types::{Document, DocumentId};
