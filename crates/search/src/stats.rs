//! Corpus-level statistics for BM25
//!
//! A [`CorpusStatistics`] value is a read-only snapshot: N, avgdl, and
//! per-term document frequency, plus the tokenization rule that produced them.
//! Rebuilding after the document set changes yields a new value.

use crate::tokenizer::tokenize_with;
use ranklab_core::{Document, Error, IdfSmoothing, Result, Tokenization};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Corpus statistics needed by the scorer
///
/// # Invariants
///
/// - `document_frequency(t) <= total_documents()` for every term
/// - `average_document_length() >= 0`, and is 0 for an empty corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStatistics {
    /// Total documents in corpus (N)
    total_documents: usize,

    /// Mean token count per document (avgdl)
    average_document_length: f64,

    /// Documents containing each term at least once (df)
    document_frequency: HashMap<String, usize>,

    /// Rule used to tokenize the corpus; queries must use the same one
    tokenization: Tokenization,
}

impl CorpusStatistics {
    /// Statistics of an empty corpus
    pub fn empty(tokenization: Tokenization) -> Self {
        CorpusStatistics {
            total_documents: 0,
            average_document_length: 0.0,
            document_frequency: HashMap::new(),
            tokenization,
        }
    }

    /// Build statistics from documents
    pub fn build(documents: &[Document], tokenization: Tokenization) -> Self {
        Self::from_texts(documents.iter().map(|d| d.text.as_str()), tokenization)
    }

    /// Build statistics from raw texts
    pub fn from_texts<'a, I>(texts: I, tokenization: Tokenization) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tokenized: Vec<Vec<String>> = texts
            .into_iter()
            .map(|t| tokenize_with(tokenization, t))
            .collect();
        Self::from_tokenized(tokenized.iter().map(Vec::as_slice), tokenization)
    }

    /// Build statistics from already-tokenized documents
    pub(crate) fn from_tokenized<'a, I>(documents: I, tokenization: Tokenization) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut total_documents = 0usize;
        let mut total_tokens = 0usize;
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for tokens in documents {
            total_documents += 1;
            total_tokens += tokens.len();

            // Once per document, not once per occurrence
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let average_document_length = if total_documents == 0 {
            0.0
        } else {
            total_tokens as f64 / total_documents as f64
        };

        CorpusStatistics {
            total_documents,
            average_document_length,
            document_frequency,
            tokenization,
        }
    }

    /// Assemble statistics from externally computed values
    ///
    /// Used when N, avgdl, and df come from an outside index (for example a
    /// database full-text index) rather than from documents in memory.
    /// Pass the result to [`crate::corpus::Corpus::with_statistics`] to rank
    /// documents against it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStatistics`] if avgdl is negative or not
    /// finite, or if any document frequency exceeds `total_documents`.
    pub fn from_parts(
        total_documents: usize,
        average_document_length: f64,
        document_frequency: HashMap<String, usize>,
        tokenization: Tokenization,
    ) -> Result<Self> {
        if !average_document_length.is_finite() || average_document_length < 0.0 {
            return Err(Error::InvalidStatistics(format!(
                "average document length must be a non-negative number, got {}",
                average_document_length
            )));
        }
        if let Some((term, df)) = document_frequency
            .iter()
            .find(|(_, df)| **df > total_documents)
        {
            return Err(Error::InvalidStatistics(format!(
                "document frequency of '{}' is {} but the corpus has {} documents",
                term, df, total_documents
            )));
        }
        Ok(CorpusStatistics {
            total_documents,
            average_document_length,
            document_frequency,
            tokenization,
        })
    }

    /// Total documents (N)
    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Average document length in tokens (avgdl)
    pub fn average_document_length(&self) -> f64 {
        self.average_document_length
    }

    /// Documents containing `term` (0 if unseen)
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    /// All document frequencies
    pub fn document_frequencies(&self) -> &HashMap<String, usize> {
        &self.document_frequency
    }

    /// Number of distinct terms in the corpus
    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    /// Tokenization rule the statistics were built with
    pub fn tokenization(&self) -> Tokenization {
        self.tokenization
    }

    /// Compute IDF for a term
    ///
    /// - Standard: `ln((N - df + 0.5) / (df + 0.5))`, negative when df > N/2
    /// - PlusOne: `ln((N - df + 0.5) / (df + 0.5) + 1)`
    ///
    /// An empty corpus has IDF 0 for every term, so nothing scored against it
    /// can rank above anything else.
    pub fn idf(&self, term: &str, smoothing: IdfSmoothing) -> f64 {
        if self.total_documents == 0 {
            return 0.0;
        }
        let n = self.total_documents as f64;
        let df = self.document_frequency(term) as f64;
        let ratio = (n - df + 0.5) / (df + 0.5);
        match smoothing {
            IdfSmoothing::Standard => ratio.ln(),
            IdfSmoothing::PlusOne => (ratio + 1.0).ln(),
        }
    }

    /// BM25 length normalization: `1 - b + b * (|D| / avgdl)`
    ///
    /// Returns 1 when avgdl is 0.
    pub fn length_norm(&self, document_length: usize, b: f64) -> f64 {
        if self.average_document_length == 0.0 {
            return 1.0;
        }
        1.0 - b + b * (document_length as f64 / self.average_document_length)
    }
}
