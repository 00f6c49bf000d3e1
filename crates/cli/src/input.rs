//! Corpus and payload file loading.
//!
//! Corpus files are either a JSON array of `{"id": ..., "text": ...}` objects
//! or plain text with one document per line. Plain-text documents are the
//! non-blank lines, numbered from 1.

use std::io::Read;
use std::path::Path;

use ranklab_core::{Document, Result, Tokenization};
use ranklab_rerank::RerankPayload;
use ranklab_search::Corpus;
use tracing::debug;

/// Load and compile a corpus file.
pub fn load_corpus(path: &Path, tokenization: Tokenization) -> Result<Corpus> {
    let content = std::fs::read_to_string(path)?;
    let corpus = parse_corpus(&content, tokenization)?;
    debug!(
        path = %path.display(),
        documents = corpus.len(),
        vocabulary = corpus.stats().vocabulary_size(),
        "corpus loaded"
    );
    Ok(corpus)
}

/// Compile corpus file content.
pub fn parse_corpus(content: &str, tokenization: Tokenization) -> Result<Corpus> {
    if content.trim_start().starts_with('[') {
        let documents: Vec<Document> = serde_json::from_str(content)?;
        Corpus::build(documents, tokenization)
    } else {
        let lines = content.lines().filter(|line| !line.trim().is_empty());
        Ok(Corpus::from_texts(lines, tokenization))
    }
}

/// Load a re-rank payload from a file, or stdin for `-`.
pub fn load_payload(path: &Path) -> Result<RerankPayload> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    RerankPayload::parse(&content)
}
