//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

use vocab_core::Catalog;

/// Five animals, one food word and one place.
pub const CATALOG_JSON: &str = r#"{
    "words": [
        {"id": "w1", "sourceTerm": "der Hund", "targetTerm": "dog", "synonyms": ["hound"], "category": "animals", "article": "der"},
        {"id": "w2", "sourceTerm": "die Katze", "targetTerm": "cat", "category": "animals", "article": "die"},
        {"id": "w3", "sourceTerm": "das Pferd", "targetTerm": "horse", "category": "animals", "article": "das"},
        {"id": "w4", "sourceTerm": "die Maus", "targetTerm": "mouse", "category": "animals", "article": "die"},
        {"id": "w5", "sourceTerm": "der Vogel", "targetTerm": "bird", "category": "animals", "article": "der"},
        {"id": "w6", "sourceTerm": "das Brot", "targetTerm": "bread", "category": "food", "article": "das"},
        {"id": "w7", "sourceTerm": "Berlin", "targetTerm": "Berlin", "category": "places"}
    ]
}"#;

pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).unwrap()
}

/// Body for POST /api/practice/answer.
pub fn answer_request(word_id: &str, answer: &str) -> Value {
    json!({ "wordId": word_id, "answer": answer })
}

/// Body for POST /api/vocabulary.
pub fn new_word_request(source: &str, target: &str) -> Value {
    json!({ "sourceTerm": source, "targetTerm": target })
}

/// Body for PUT /api/vocabulary/:id.
pub fn edit_request(source: &str, target: &str, synonyms: &[&str]) -> Value {
    json!({ "sourceTerm": source, "targetTerm": target, "synonyms": synonyms })
}
