//! Shared corpora and payloads.

#![allow(dead_code)]

use ranklab::{Corpus, Document, Tokenization};
use serde_json::{json, Value};

/// Recipe corpus used throughout the retrieval tests.
pub fn recipe_documents() -> Vec<Document> {
    vec![
        Document::new(
            101,
            "This chocolate cake recipe is amazing. The chocolate frosting makes the cake perfect!",
        ),
        Document::new(102, "Classic vanilla cake with buttercream"),
        Document::new(103, "Chocolate chip cookies, crisp outside and chewy inside"),
        Document::new(104, "Lemon tart with a shortbread crust"),
        Document::new(105, "Carrot cake with cream cheese frosting"),
        Document::new(106, "Dark chocolate mousse"),
    ]
}

pub fn recipes() -> Corpus {
    Corpus::build(recipe_documents(), Tokenization::Whitespace).unwrap()
}

pub fn recipes_with(tokenization: Tokenization) -> Corpus {
    Corpus::build(recipe_documents(), tokenization).unwrap()
}

/// Both sides of a re-rank request in the wrapper shape.
pub fn wrapped_payload() -> Value {
    json!({
        "query": "chocolate cake",
        "fulltext_search": {
            "results": [
                {"document_id": 1, "relevance_score": 10, "title": "Chocolate cake"},
                {"document_id": 2, "relevance_score": 5, "title": "Chocolate cookies"}
            ]
        },
        "vector_search": {
            "results": [
                {"document_id": 2, "similarity_score": 0.8},
                {"document_id": 3, "similarity_score": 0.4, "title": "Mousse"}
            ]
        }
    })
}
