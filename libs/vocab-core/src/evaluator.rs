//! Answer evaluation for spoken or typed responses.
//!
//! Each acceptable answer (the expected answer, then every synonym in order)
//! is tried against the learner's transcript with progressively looser
//! rules. Exact and variant checks run before fuzzy scoring, and the
//! whole-phrase fuzzy threshold is the loosest of all.

use crate::fuzzy::similarity;
use crate::normalize::normalize;
use crate::types::Settings;
use crate::variants::variants;
use serde::{Deserialize, Serialize};

/// Default per-token similarity a word must exceed.
pub const TOKEN_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Default whole-phrase similarity the transcript must exceed.
pub const PHRASE_SIMILARITY_THRESHOLD: f64 = 0.65;

/// Which rule accepted an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Cleaned transcript equals the cleaned candidate.
    Exact,
    /// One spoken word equals a variant of the candidate.
    TokenVariant,
    /// The whole transcript equals a variant of the candidate.
    PhraseVariant,
    /// The candidate is a variant of one spoken word.
    ReverseVariant,
    /// One spoken word is close enough to the candidate.
    TokenFuzzy,
    /// The whole transcript is close enough to the candidate.
    PhraseFuzzy,
}

/// Outcome of evaluating one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<MatchRule>,
    /// The acceptable answer that matched, as written in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    /// Transcript after normalization (for display).
    pub cleaned_answer: String,
}

/// Evaluator with tunable fuzzy thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerEvaluator {
    pub token_threshold: f64,
    pub phrase_threshold: f64,
}

impl Default for AnswerEvaluator {
    fn default() -> Self {
        Self {
            token_threshold: TOKEN_SIMILARITY_THRESHOLD,
            phrase_threshold: PHRASE_SIMILARITY_THRESHOLD,
        }
    }
}

impl AnswerEvaluator {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            token_threshold: settings.token_similarity_threshold,
            phrase_threshold: settings.phrase_similarity_threshold,
        }
    }

    /// Judge `answer` against `expected` and its synonyms.
    pub fn evaluate(&self, answer: &str, expected: &str, synonyms: &[String]) -> Evaluation {
        let cleaned_answer = normalize(answer);
        let tokens: Vec<&str> = cleaned_answer.split_whitespace().collect();

        let candidates = std::iter::once(expected).chain(synonyms.iter().map(String::as_str));
        for candidate in candidates {
            let cleaned_candidate = normalize(candidate);
            if let Some(rule) = self.match_candidate(&cleaned_answer, &tokens, &cleaned_candidate) {
                tracing::debug!(
                    answer,
                    cleaned = %cleaned_answer,
                    candidate,
                    ?rule,
                    "answer accepted"
                );
                return Evaluation {
                    accepted: true,
                    rule: Some(rule),
                    matched: Some(candidate.to_string()),
                    cleaned_answer,
                };
            }
        }

        tracing::debug!(answer, cleaned = %cleaned_answer, expected, "answer rejected");
        Evaluation {
            accepted: false,
            rule: None,
            matched: None,
            cleaned_answer,
        }
    }

    fn match_candidate(&self, answer: &str, tokens: &[&str], candidate: &str) -> Option<MatchRule> {
        if answer == candidate {
            return Some(MatchRule::Exact);
        }
        // Stripping a lone "s" yields an empty variant, so empty strings are
        // only ever equal to each other.
        if answer.is_empty() || candidate.is_empty() {
            return None;
        }

        let candidate_forms = variants(candidate);
        if tokens
            .iter()
            .any(|token| candidate_forms.iter().any(|form| form == token))
        {
            return Some(MatchRule::TokenVariant);
        }

        if candidate_forms.iter().any(|form| form == answer) {
            return Some(MatchRule::PhraseVariant);
        }

        if tokens
            .iter()
            .flat_map(|token| variants(token))
            .any(|form| form == candidate)
        {
            return Some(MatchRule::ReverseVariant);
        }

        if tokens
            .iter()
            .any(|token| similarity(token, candidate) > self.token_threshold)
        {
            return Some(MatchRule::TokenFuzzy);
        }

        if similarity(answer, candidate) > self.phrase_threshold {
            return Some(MatchRule::PhraseFuzzy);
        }

        None
    }
}

/// Whether `answer` is acceptable for `expected` or any synonym, using the
/// default thresholds.
pub fn evaluate_answer(answer: &str, expected: &str, synonyms: &[String]) -> bool {
    AnswerEvaluator::default()
        .evaluate(answer, expected, synonyms)
        .accepted
}
