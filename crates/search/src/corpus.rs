//! Compiled corpus snapshot
//!
//! A [`Corpus`] holds documents in their original order together with their
//! pre-counted terms, the corpus statistics, and an id lookup table. It is
//! immutable after construction; a changed document set means building a new
//! `Corpus` (see [`crate::index::SearchIndex`] for swapping snapshots).

use crate::explain::ScoreExplainer;
use crate::ranker::Ranker;
use crate::scorer::DocumentTerms;
use crate::stats::CorpusStatistics;
use crate::tokenizer::tokenize_with;
use ranklab_core::{
    Bm25Params, Document, DocumentId, Error, Result, ScoreExplanation, ScoredResult,
    SearchOptions, Tokenization,
};
use std::collections::HashMap;

/// Immutable, ordered document collection ready for scoring
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Documents in corpus order
    documents: Vec<Document>,
    /// Counted terms, parallel to `documents`
    terms: Vec<DocumentTerms>,
    /// Document id → position in `documents`
    positions: HashMap<DocumentId, usize>,
    /// N, avgdl, df
    stats: CorpusStatistics,
}

impl Corpus {
    /// Compile documents into a corpus
    ///
    /// Each document is tokenized once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDocument`] if two documents share an id.
    pub fn build(documents: Vec<Document>, tokenization: Tokenization) -> Result<Self> {
        let positions = unique_positions(&documents)?;
        Ok(Self::compile(documents, positions, tokenization))
    }

    /// Pair documents with externally supplied statistics
    ///
    /// Scoring uses `stats` as given (N, avgdl, df) instead of deriving them
    /// from `documents`, so a page of candidates fetched from a larger index
    /// ranks against that index's statistics. Documents are tokenized with
    /// the rule recorded in `stats`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDocument`] if two documents share an id.
    pub fn with_statistics(documents: Vec<Document>, stats: CorpusStatistics) -> Result<Self> {
        let positions = unique_positions(&documents)?;
        let tokenization = stats.tokenization();
        let terms = documents
            .iter()
            .map(|d| DocumentTerms::from_text(&d.text, tokenization))
            .collect();

        Ok(Corpus {
            documents,
            terms,
            positions,
            stats,
        })
    }

    /// Compile plain texts, numbering documents from 1 in order
    pub fn from_texts<I, S>(texts: I, tokenization: Tokenization) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents: Vec<Document> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document::new(DocumentId::Int(i as i64 + 1), text))
            .collect();
        let positions = documents
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();
        Self::compile(documents, positions, tokenization)
    }

    fn compile(
        documents: Vec<Document>,
        positions: HashMap<DocumentId, usize>,
        tokenization: Tokenization,
    ) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| tokenize_with(tokenization, &d.text))
            .collect();
        let stats =
            CorpusStatistics::from_tokenized(tokenized.iter().map(Vec::as_slice), tokenization);
        let terms = tokenized
            .iter()
            .map(|t| DocumentTerms::from_tokens(t))
            .collect();

        Corpus {
            documents,
            terms,
            positions,
            stats,
        }
    }

    /// An empty corpus
    pub fn empty(tokenization: Tokenization) -> Self {
        Corpus {
            documents: vec![],
            terms: vec![],
            positions: HashMap::new(),
            stats: CorpusStatistics::empty(tokenization),
        }
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Corpus statistics
    pub fn stats(&self) -> &CorpusStatistics {
        &self.stats
    }

    /// Tokenization rule used for documents and queries
    pub fn tokenization(&self) -> Tokenization {
        self.stats.tokenization()
    }

    /// Documents in corpus order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id
    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.position(id).map(|i| &self.documents[i])
    }

    /// Position of a document in corpus order
    pub fn position(&self, id: &DocumentId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Counted terms of a document
    pub fn terms_of(&self, id: &DocumentId) -> Option<&DocumentTerms> {
        self.position(id).map(|i| &self.terms[i])
    }

    /// Documents paired with their counted terms, in corpus order
    pub fn entries(&self) -> impl Iterator<Item = (&Document, &DocumentTerms)> {
        self.documents.iter().zip(self.terms.iter())
    }

    /// Rank every document against `query`
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<ScoredResult> {
        Ranker::new(*options).search(query, self)
    }

    /// Explain the score of one document
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if `id` is not in the corpus.
    pub fn explain(
        &self,
        query: &str,
        id: &DocumentId,
        params: &Bm25Params,
    ) -> Result<ScoreExplanation> {
        ScoreExplainer::new(*params).explain(self, query, id)
    }
}

/// Id → position table, rejecting repeated ids
fn unique_positions(documents: &[Document]) -> Result<HashMap<DocumentId, usize>> {
    let mut positions = HashMap::with_capacity(documents.len());
    for (i, doc) in documents.iter().enumerate() {
        if positions.insert(doc.id.clone(), i).is_some() {
            return Err(Error::DuplicateDocument(doc.id.clone()));
        }
    }
    Ok(positions)
}
