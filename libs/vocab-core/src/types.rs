//! Core types for the vocabulary drill.

use crate::error::SettingsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// A single vocabulary entry from the catalog.
///
/// Catalog files written before the source/target naming use `german` and
/// `english`; both spellings are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    #[serde(alias = "german")]
    pub source_term: String,
    #[serde(alias = "english", alias = "danish")]
    pub target_term: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub article: Option<String>,
}

impl VocabularyItem {
    /// Whether this item belongs to one of the given lowercased categories.
    pub fn in_category(&self, lowercased: &BTreeSet<String>) -> bool {
        lowercased.contains(&self.category.to_lowercase())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Learning state derived from a word's progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryState {
    Unseen,
    InProgress,
    Mastered,
}

impl MasteryState {
    /// State of a word given its (possibly missing) progress record.
    pub fn of(progress: Option<&WordProgress>) -> Self {
        match progress {
            None => Self::Unseen,
            Some(p) if p.is_mastered() => Self::Mastered,
            Some(_) => Self::InProgress,
        }
    }
}

/// Per-word learning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    pub word_id: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub times_reviewed: u32,
    pub last_practiced_at: DateTime<Utc>,
    #[serde(default)]
    pub mastered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_review_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub manually_marked: bool,
}

impl WordProgress {
    /// Fresh record with zero counts.
    pub fn new(word_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            word_id: word_id.into(),
            correct_count: 0,
            incorrect_count: 0,
            times_reviewed: 0,
            last_practiced_at: now,
            mastered_at: None,
            next_review_at: None,
            manually_marked: false,
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.mastered_at.is_some()
    }

    pub fn state(&self) -> MasteryState {
        MasteryState::of(Some(self))
    }

    /// Whether automatic selection should offer this word for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if self.manually_marked {
            return false;
        }
        match self.next_review_at {
            None => true,
            Some(due) => due <= now,
        }
    }
}

/// User-facing settings shared by the selector and the mastery tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub mastery_threshold: u32,
    pub excluded_categories: BTreeSet<String>,
    pub words_per_session: usize,
    pub token_similarity_threshold: f64,
    pub phrase_similarity_threshold: f64,
    pub demotion_ratio: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mastery_threshold: 3,
            excluded_categories: ["places", "names"].into_iter().map(String::from).collect(),
            words_per_session: 20,
            token_similarity_threshold: 0.7,
            phrase_similarity_threshold: 0.65,
            demotion_ratio: 2,
        }
    }
}

impl Settings {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.mastery_threshold < 1 {
            return Err(SettingsError::MasteryThreshold(self.mastery_threshold));
        }
        if self.words_per_session == 0 {
            return Err(SettingsError::SessionSize);
        }
        for (name, value) in [
            ("tokenSimilarityThreshold", self.token_similarity_threshold),
            ("phraseSimilarityThreshold", self.phrase_similarity_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SettingsError::SimilarityThreshold { name, value });
            }
        }
        Ok(())
    }

    /// Excluded categories, lowercased for case-insensitive comparison.
    pub fn excluded_lowercase(&self) -> BTreeSet<String> {
        self.excluded_categories
            .iter()
            .map(|c| c.to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn legacy_catalog_fields_are_accepted() {
        let json = r#"{"id":"w1","german":"der Hund","english":"dog","category":"animals","article":""}"#;
        let item: VocabularyItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.source_term, "der Hund");
        assert_eq!(item.target_term, "dog");
        assert!(item.synonyms.is_empty());
        assert_eq!(item.article, None);
    }

    #[test]
    fn progress_serializes_with_camel_case_fields() {
        let progress = WordProgress::new("w1", Utc::now());
        let value = serde_json::to_value(&progress).unwrap();
        assert!(value.get("wordId").is_some());
        assert!(value.get("nextReviewAt").is_some());
        assert_eq!(value["manuallyMarked"], false);
    }

    #[test]
    fn state_is_derived_from_fields() {
        let now = Utc::now();
        assert_eq!(MasteryState::of(None), MasteryState::Unseen);
        let mut progress = WordProgress::new("w1", now);
        assert_eq!(progress.state(), MasteryState::InProgress);
        progress.mastered_at = Some(now);
        assert_eq!(progress.state(), MasteryState::Mastered);
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let settings = Settings {
            mastery_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MasteryThreshold(0))
        ));
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"masteryThreshold":5}"#).unwrap();
        assert_eq!(settings.mastery_threshold, 5);
        assert_eq!(settings.words_per_session, 20);
        assert!(settings.excluded_categories.contains("places"));
    }
}
