//! Practice session selection.
//!
//! A session mixes words due for review (up to 70% of the slots) with words
//! never practiced (up to 30%), then shuffles them.

use crate::types::{Settings, VocabularyItem, WordProgress};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Share of session slots reserved for review words.
pub const REVIEW_SHARE: f64 = 0.7;

/// Share of session slots offered to new words.
pub const NEW_SHARE: f64 = 0.3;

fn share_of(size: usize, share: f64) -> usize {
    (size as f64 * share).floor() as usize
}

/// Build a session of at most `size` words.
///
/// Review candidates are progress records that are not manually marked and
/// whose review time is absent or has passed, in progress order. Records
/// whose word is gone from the catalog are skipped. An empty result means
/// nothing is available to practice.
pub fn select_session<R: Rng + ?Sized>(
    catalog: &[VocabularyItem],
    progress: &[WordProgress],
    settings: &Settings,
    size: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<VocabularyItem> {
    let excluded = settings.excluded_lowercase();
    let by_id: HashMap<&str, &VocabularyItem> =
        catalog.iter().map(|item| (item.id.as_str(), item)).collect();

    let due: Vec<&VocabularyItem> = progress
        .iter()
        .filter(|p| p.is_due(now))
        .filter_map(|p| {
            let item = by_id.get(p.word_id.as_str()).copied();
            if item.is_none() {
                tracing::debug!(word_id = %p.word_id, "skipping progress for word missing from catalog");
            }
            item
        })
        .filter(|item| !item.in_category(&excluded))
        .collect();

    let practiced: HashSet<&str> = progress.iter().map(|p| p.word_id.as_str()).collect();
    let new_words = catalog
        .iter()
        .filter(|item| !practiced.contains(item.id.as_str()))
        .filter(|item| !item.in_category(&excluded))
        .take(share_of(size, NEW_SHARE));

    let review_quota = due.len().min(share_of(size, REVIEW_SHARE));
    let mut session: Vec<VocabularyItem> = due
        .into_iter()
        .take(review_quota)
        .chain(new_words)
        .cloned()
        .collect();

    session.shuffle(rng);
    session.truncate(size);

    tracing::debug!(size = session.len(), requested = size, "session selected");
    session
}

/// Build a session of `settings.words_per_session` words with the thread RNG.
pub fn select_default_session(
    catalog: &[VocabularyItem],
    progress: &[WordProgress],
    settings: &Settings,
    now: DateTime<Utc>,
) -> Vec<VocabularyItem> {
    select_session(
        catalog,
        progress,
        settings,
        settings.words_per_session,
        now,
        &mut rand::rng(),
    )
}
