//! Output → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): aligned tables and term breakdowns
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use std::fmt::Write;

use ranklab_core::{Error, ScoreExplanation, ScoredResult};
use ranklab_rerank::{RankedCandidate, RerankExplanation};
use serde::Serialize;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Longest document excerpt shown in human mode.
const EXCERPT_CHARS: usize = 60;

/// Format ranked search results.
pub fn format_search(query: &str, results: &[ScoredResult], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({
            "query": query,
            "count": results.len(),
            "results": results,
        })),
        OutputMode::Human => {
            if results.is_empty() {
                return "(no results)".to_string();
            }
            let mut out = String::new();
            for (i, r) in results.iter().enumerate() {
                let _ = write!(
                    out,
                    "{:>3}. [{}] score={:.4} matched={}",
                    i + 1,
                    r.document_id,
                    r.score,
                    r.matched_terms
                );
                if let Some(text) = &r.document {
                    let _ = write!(out, "  {}", excerpt(text));
                }
                out.push('\n');
            }
            out.pop();
            out
        }
    }
}

/// Format a single-document score explanation.
pub fn format_explanation(explanation: &ScoreExplanation, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => to_json(explanation),
        OutputMode::Human => {
            let mut out = String::new();
            let _ = writeln!(out, "Query:    {}", explanation.query);
            let _ = writeln!(out, "Document: {}", explanation.document_id);
            let _ = writeln!(
                out,
                "Length:   {} (average {:.2})",
                explanation.document_length, explanation.average_document_length
            );
            let _ = writeln!(
                out,
                "{:<20} {:>4} {:>5} {:>9} {:>9} {:>9} {:>9}",
                "term", "tf", "df", "idf", "num", "denom", "score"
            );
            for t in &explanation.terms {
                if t.found {
                    let _ = writeln!(
                        out,
                        "{:<20} {:>4} {:>5} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
                        t.term,
                        t.term_frequency,
                        t.document_frequency,
                        t.idf,
                        t.numerator,
                        t.denominator,
                        t.term_score
                    );
                } else {
                    let _ = writeln!(
                        out,
                        "{:<20} {:>4} {:>5} {:>9.4} {:>9} {:>9} {:>9.4}  (not found)",
                        t.term, 0, t.document_frequency, t.idf, "-", "-", 0.0
                    );
                }
            }
            let _ = write!(out, "Total:    {:.4}", explanation.total_score);
            out
        }
    }
}

/// Format re-ranked results.
pub fn format_rerank(
    query: Option<&str>,
    results: &[RankedCandidate],
    skipped: usize,
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({
            "query": query,
            "method": "reranking",
            "count": results.len(),
            "skipped": skipped,
            "results": results,
        })),
        OutputMode::Human => {
            let mut out = String::new();
            if let Some(q) = query {
                let _ = writeln!(out, "Query: {}", q);
            }
            if results.is_empty() {
                out.push_str("(no results)");
            }
            for r in results {
                let _ = write!(
                    out,
                    "{:>3}. [{}] relevance={:.4} similarity={:.4}",
                    r.position, r.document_id, r.relevance_score, r.similarity_score
                );
                if let Some(title) = r.metadata.get("title").and_then(|v| v.as_str()) {
                    let _ = write!(out, "  {}", excerpt(title));
                }
                out.push('\n');
            }
            if skipped > 0 {
                let _ = writeln!(out, "({} item(s) skipped: no document id)", skipped);
            }
            out.trim_end().to_string()
        }
    }
}

/// Format re-ranked results with their calculation steps.
pub fn format_rerank_explained(
    query: Option<&str>,
    explanation: &RerankExplanation,
    skipped: usize,
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Json => to_json(&serde_json::json!({
            "query": query,
            "method": "reranking",
            "count": explanation.results.len(),
            "skipped": skipped,
            "results": explanation.results,
            "steps": explanation.steps,
        })),
        OutputMode::Human => {
            let mut out = String::new();
            for (i, step) in explanation.steps.iter().enumerate() {
                let _ = writeln!(out, "Step {}: {}", i + 1, step.name());
                let _ = writeln!(out, "  {}", step.description);
            }
            out.push('\n');
            out.push_str(&format_rerank(query, &explanation.results, skipped, mode));
            out
        }
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": err.to_string()
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn excerpt(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", cut)
    }
}
