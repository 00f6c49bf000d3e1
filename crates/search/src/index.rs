//! Rebuildable search index
//!
//! This module provides:
//! - SearchIndex holding the current [`Corpus`] snapshot
//! - Snapshot-swap rebuilds that never block in-flight searches
//! - Version watermark for consistency
//!
//! # Concurrency
//!
//! Readers take the read lock only long enough to clone an `Arc<Corpus>`,
//! then search without holding it. A rebuild compiles the new corpus outside
//! the lock and swaps the pointer under the write lock, so a search that
//! started before the swap finishes on the old snapshot and a search that
//! starts after sees the new one. Statistics never mix across snapshots.

use crate::corpus::Corpus;
use parking_lot::RwLock;
use ranklab_core::{
    Bm25Params, Document, DocumentId, Result, ScoreExplanation, ScoredResult, SearchOptions,
    Tokenization,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Holder of the current corpus snapshot
///
/// # Version Watermark
///
/// The version starts at 0 and is incremented on every published snapshot.
pub struct SearchIndex {
    /// Currently published snapshot
    current: RwLock<Arc<Corpus>>,

    /// Version watermark, bumped under the write lock
    version: AtomicU64,
}

impl SearchIndex {
    /// Create an index publishing `corpus` at version 0
    pub fn new(corpus: Corpus) -> Self {
        SearchIndex {
            current: RwLock::new(Arc::new(corpus)),
            version: AtomicU64::new(0),
        }
    }

    /// Compile documents and publish them at version 0
    ///
    /// # Errors
    ///
    /// Returns [`ranklab_core::Error::DuplicateDocument`] if two documents
    /// share an id.
    pub fn build(documents: Vec<Document>, tokenization: Tokenization) -> Result<Self> {
        Ok(Self::new(Corpus::build(documents, tokenization)?))
    }

    /// An index over an empty corpus
    pub fn empty(tokenization: Tokenization) -> Self {
        Self::new(Corpus::empty(tokenization))
    }

    /// Current snapshot
    ///
    /// The returned corpus stays valid after later rebuilds.
    pub fn snapshot(&self) -> Arc<Corpus> {
        self.current.read().clone()
    }

    /// Current version
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Check if index is at least at given version
    pub fn is_at_version(&self, min_version: u64) -> bool {
        self.version() >= min_version
    }

    /// Tokenization rule of the current snapshot
    pub fn tokenization(&self) -> Tokenization {
        self.current.read().tokenization()
    }

    /// Number of documents in the current snapshot
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Whether the current snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    /// Recompile from a new document set and publish it
    ///
    /// Keeps the current tokenization rule. On error the published snapshot
    /// is unchanged. Returns the new version.
    pub fn rebuild(&self, documents: Vec<Document>) -> Result<u64> {
        let corpus = Corpus::build(documents, self.tokenization())?;
        Ok(self.replace(corpus))
    }

    /// Publish an already compiled corpus, returning the new version
    pub fn replace(&self, corpus: Corpus) -> u64 {
        let documents = corpus.len();
        let vocabulary = corpus.stats().vocabulary_size();
        let new_corpus = Arc::new(corpus);

        let version = {
            let mut current = self.current.write();
            *current = new_corpus;
            self.version.fetch_add(1, Ordering::AcqRel) + 1
        };

        info!(version, documents, vocabulary, "published corpus snapshot");
        version
    }

    /// Rank the current snapshot against `query`
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<ScoredResult> {
        self.snapshot().search(query, options)
    }

    /// Explain one document's score in the current snapshot
    ///
    /// # Errors
    ///
    /// Returns [`ranklab_core::Error::DocumentNotFound`] if `id` is not in the
    /// current snapshot.
    pub fn explain(
        &self,
        query: &str,
        id: &DocumentId,
        params: &Bm25Params,
    ) -> Result<ScoreExplanation> {
        self.snapshot().explain(query, id, params)
    }
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("version", &self.version())
            .field("documents", &self.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
