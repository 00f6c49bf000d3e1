//! Hybrid re-ranking from JSON requests.

use crate::fixtures::wrapped_payload;
use ranklab::{DocumentId, Error, RerankPayload, StepDetail};
use serde_json::json;

fn order(payload: &RerankPayload) -> Vec<i64> {
    payload
        .rerank()
        .iter()
        .filter_map(|r| r.document_id.as_int())
        .collect()
}

#[test]
fn wrapped_payload_scenario() {
    let payload = RerankPayload::from_json(&wrapped_payload()).unwrap();
    assert_eq!(payload.query.as_deref(), Some("chocolate cake"));

    let results = payload.rerank();
    let ids: Vec<i64> = results.iter().filter_map(|r| r.document_id.as_int()).collect();
    let positions: Vec<usize> = results.iter().map(|r| r.position).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(positions, vec![1, 2, 3]);

    // id 2 is in both lists: lexical metadata survives, similarity is filled in
    assert_eq!(results[0].relevance_score, 5.0);
    assert_eq!(results[0].similarity_score, 0.8);
    assert_eq!(results[0].metadata["title"], "Chocolate cookies");
    assert_eq!(results[2].metadata["title"], "Mousse");
}

#[test]
fn raw_array_payload_matches_wrapped_payload() {
    let raw = json!({
        "fts_results": [
            {"document_id": 1, "relevance_score": 10},
            {"document_id": 2, "relevance_score": 5}
        ],
        "vector_results": [
            {"document_id": 2, "similarity_score": 0.8},
            {"document_id": 3, "similarity_score": 0.4}
        ]
    });
    let payload = RerankPayload::from_json(&raw).unwrap();
    assert_eq!(order(&payload), vec![2, 1, 3]);
}

#[test]
fn combined_list_is_split_by_score_fields() {
    let combined = json!({
        "results": [
            {"post_id": 1, "relevance_score": 10},
            {"post_id": 2, "relevance_score": 5, "similarity_score": 0.8},
            {"post_id": 3, "similarity_score": 0.4}
        ]
    });
    let payload = RerankPayload::from_json(&combined).unwrap();
    assert_eq!(payload.lexical.len(), 2);
    assert_eq!(payload.vector.len(), 2);
    assert_eq!(order(&payload), vec![2, 1, 3]);
}

#[test]
fn string_scores_and_ids_are_accepted() {
    let text = r#"{
        "fts_results": [{"document_id": "7", "relevance_score": "4.5"}],
        "vector_results": [{"document_id": 7, "similarity_score": "0.5"}]
    }"#;
    let payload = RerankPayload::parse(text).unwrap();
    let results = payload.rerank();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document_id, DocumentId::Int(7));
    assert_eq!(results[0].relevance_score, 4.5);
    assert_eq!(results[0].similarity_score, 0.5);
}

#[test]
fn items_without_ids_are_skipped_not_fatal() {
    let text = r#"{
        "fts_results": [{"relevance_score": 3}, {"document_id": 4, "relevance_score": 1}],
        "vector_results": ["not an object"]
    }"#;
    let payload = RerankPayload::parse(text).unwrap();
    assert_eq!(payload.skipped, 2);
    assert_eq!(order(&payload), vec![4]);
}

#[test]
fn empty_request_yields_empty_ranking() {
    let payload = RerankPayload::parse("{}").unwrap();
    assert!(payload.is_empty());
    assert!(payload.rerank().is_empty());
    assert_eq!(payload.rerank_explained().steps.len(), 6);
}

#[test]
fn non_object_request_is_rejected() {
    let err = RerankPayload::parse("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)));
}

#[test]
fn explained_trace_serializes_named_steps() {
    let payload = RerankPayload::from_json(&wrapped_payload()).unwrap();
    let explanation = payload.rerank_explained();
    assert_eq!(explanation.results, payload.rerank());

    match &explanation.steps[1].detail {
        StepDetail::MaxScores {
            max_relevance,
            max_similarity,
        } => {
            assert_eq!(*max_relevance, 10.0);
            assert_eq!(*max_similarity, 0.8);
        }
        other => panic!("unexpected step: {:?}", other),
    }

    let value = serde_json::to_value(&explanation.steps).unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Input Data",
            "Max Scores Calculation",
            "Merge Results",
            "Normalization and Combined Score",
            "Sorting",
            "Final Positions",
        ]
    );
    assert_eq!(
        value[3]["normalized_items"][1]["combined_expression"],
        "0.5000 + 1.0000 = 1.5000"
    );
}
