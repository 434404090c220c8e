//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from vocab-core
pub use vocab_core::{
    MasteryState, MatchRule, NewWord, Settings, StatisticsReport, VocabularyItem, WordEdit,
    WordProgress,
};

// === Vocabulary ===

/// Query for GET /api/vocabulary
#[derive(Debug, Default, Deserialize)]
pub struct VocabularyQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// One catalog row with the learner's state attached
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRow {
    #[serde(flatten)]
    pub item: VocabularyItem,
    pub known: bool,
    pub state: MasteryState,
    pub custom: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyListResponse {
    pub words: Vec<VocabularyRow>,
    pub total: usize,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkAddRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAddResponse {
    pub added: Vec<VocabularyItem>,
    /// Source terms skipped because they already exist
    pub duplicates: Vec<String>,
    /// Lines that could not be parsed
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: String,
}

// === Practice ===

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub size: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub words: Vec<VocabularyItem>,
    /// True when no word is due and none is new
    pub nothing_to_practice: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub word_id: String,
    /// Spoken transcript or typed answer
    pub answer: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    /// The learner asked to hear the word again; nothing was graded
    pub repeat: bool,
    pub correct: bool,
    pub expected: String,
    pub cleaned_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<MatchRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<WordProgress>,
    pub newly_mastered: bool,
    pub demoted: bool,
}

// === Known words ===

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportKnownRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkKnownResponse {
    /// Number of words now marked known
    pub marked: usize,
    /// Pasted terms with no catalog match
    pub unmatched: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub count: usize,
    /// One source term per line
    pub text: String,
}

// === Settings ===

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub mastery_threshold: Option<u32>,
    pub excluded_categories: Option<Vec<String>>,
    pub words_per_session: Option<usize>,
    pub token_similarity_threshold: Option<f64>,
    pub phrase_similarity_threshold: Option<f64>,
    pub demotion_ratio: Option<u32>,
}
