//! Learning statistics derived from the catalog and progress book.

use crate::progress::ProgressBook;
use crate::types::VocabularyItem;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How many recently mastered words the report lists.
pub const RECENT_MASTERED_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub total: usize,
    pub mastered: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteredWord {
    pub word_id: String,
    pub source_term: String,
    pub target_term: String,
    pub mastered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub total_mastered: usize,
    pub total_available: usize,
    /// Rounded to a whole percent.
    pub mastery_percentage: u32,
    pub streak_days: u32,
    pub words_learned_today: u32,
    pub words_learned_this_week: usize,
    pub accuracy_rate: f64,
    pub total_correct: u32,
    pub total_attempts: u32,
    pub category_stats: BTreeMap<String, CategoryProgress>,
    /// Newest first.
    pub recently_mastered: Vec<MasteredWord>,
}

/// Build the statistics report as of `now`.
///
/// Progress for words no longer in the catalog is ignored.
pub fn compute(
    catalog: &[VocabularyItem],
    book: &ProgressBook,
    now: DateTime<Utc>,
) -> StatisticsReport {
    let by_id: HashMap<&str, &VocabularyItem> =
        catalog.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut category_stats: BTreeMap<String, CategoryProgress> = BTreeMap::new();
    for item in catalog {
        category_stats.entry(item.category.clone()).or_default().total += 1;
    }

    let mut recently_mastered = Vec::new();
    for progress in book.mastered() {
        let item = by_id.get(progress.word_id.as_str());
        let (Some(item), Some(mastered_at)) = (item, progress.mastered_at) else {
            continue;
        };
        if let Some(stats) = category_stats.get_mut(&item.category) {
            stats.mastered += 1;
        }
        recently_mastered.push(MasteredWord {
            word_id: item.id.clone(),
            source_term: item.source_term.clone(),
            target_term: item.target_term.clone(),
            mastered_at,
        });
    }

    let total_mastered = recently_mastered.len();
    let total_available = catalog.len();
    let week_ago = now - Duration::days(7);
    let words_learned_this_week = recently_mastered
        .iter()
        .filter(|w| w.mastered_at >= week_ago)
        .count();

    recently_mastered.sort_by(|a, b| b.mastered_at.cmp(&a.mastered_at));
    recently_mastered.truncate(RECENT_MASTERED_LIMIT);

    let mastery_percentage = if total_available == 0 {
        0
    } else {
        (total_mastered as f64 / total_available as f64 * 100.0).round() as u32
    };

    let today = now.date_naive();
    StatisticsReport {
        total_mastered,
        total_available,
        mastery_percentage,
        streak_days: book.current_streak(today),
        words_learned_today: book.statistics.learned_today(today),
        words_learned_this_week,
        accuracy_rate: book.statistics.accuracy_rate(),
        total_correct: book.statistics.total_correct,
        total_attempts: book.statistics.total_attempts,
        category_stats,
        recently_mastered,
    }
}

/// Source terms of every mastered word, one per line, for transfer into
/// another installation's bulk "mark known" import.
pub fn export_known(catalog: &[VocabularyItem], book: &ProgressBook) -> Vec<String> {
    book.mastered()
        .filter_map(|p| catalog.iter().find(|item| item.id == p.word_id))
        .map(|item| item.source_term.clone())
        .collect()
}
