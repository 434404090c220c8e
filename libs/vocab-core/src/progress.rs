//! The learner's progress collection and running practice totals.

use crate::mastery::{AttemptOutcome, MasteryTracker};
use crate::scheduler::ReviewScheduler;
use crate::types::WordProgress;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Running counters updated on every answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeTotals {
    pub total_correct: u32,
    pub total_attempts: u32,
    pub streak_days: u32,
    pub words_learned_today: u32,
    /// Day `words_learned_today` refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learned_on: Option<NaiveDate>,
}

impl PracticeTotals {
    pub fn accuracy_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            f64::from(self.total_correct) / f64::from(self.total_attempts)
        }
    }

    /// Words mastered on `today`; zero if the counter belongs to another day.
    pub fn learned_today(&self, today: NaiveDate) -> u32 {
        if self.learned_on == Some(today) {
            self.words_learned_today
        } else {
            0
        }
    }

    fn count_learned(&mut self, today: NaiveDate) {
        self.words_learned_today = self.learned_today(today) + 1;
        self.learned_on = Some(today);
    }
}

/// All progress records plus practice totals, in first-practiced order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBook {
    pub words: Vec<WordProgress>,
    pub statistics: PracticeTotals,
    /// Last day a word was newly mastered; drives the streak.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practice_date: Option<NaiveDate>,
}

impl ProgressBook {
    pub fn get(&self, word_id: &str) -> Option<&WordProgress> {
        self.words.iter().find(|p| p.word_id == word_id)
    }

    /// Replace the record for `progress.word_id`, or append it.
    pub fn upsert(&mut self, progress: WordProgress) {
        match self.words.iter_mut().find(|p| p.word_id == progress.word_id) {
            Some(existing) => *existing = progress,
            None => self.words.push(progress),
        }
    }

    /// Drop a word's record. Returns whether one existed.
    pub fn remove(&mut self, word_id: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|p| p.word_id != word_id);
        self.words.len() != before
    }

    pub fn mastered(&self) -> impl Iterator<Item = &WordProgress> {
        self.words.iter().filter(|p| p.is_mastered())
    }

    /// Grade one answer, creating the record on first sight.
    pub fn record_attempt<S: ReviewScheduler>(
        &mut self,
        tracker: &MasteryTracker<S>,
        word_id: &str,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> AttemptOutcome {
        let current = self
            .get(word_id)
            .cloned()
            .unwrap_or_else(|| WordProgress::new(word_id, now));
        let outcome = tracker.record_attempt(&current, is_correct, now);

        let today = now.date_naive();
        self.statistics.total_attempts += 1;
        if is_correct {
            self.statistics.total_correct += 1;
        }
        if outcome.newly_mastered {
            self.statistics.count_learned(today);
            self.touch_learning_day(today);
        }

        self.upsert(outcome.progress.clone());
        outcome
    }

    /// Flip the manual mark on a word and return its new record.
    pub fn toggle_manual_mark<S: ReviewScheduler>(
        &mut self,
        tracker: &MasteryTracker<S>,
        word_id: &str,
        now: DateTime<Utc>,
    ) -> WordProgress {
        let updated = tracker.toggle_manual_mark(self.get(word_id), word_id, now);
        self.upsert(updated.clone());
        updated
    }

    /// Mark a word known without toggling.
    pub fn mark_known<S: ReviewScheduler>(
        &mut self,
        tracker: &MasteryTracker<S>,
        word_id: &str,
        now: DateTime<Utc>,
    ) -> WordProgress {
        let updated = tracker.mark_known(self.get(word_id), word_id, now);
        self.upsert(updated.clone());
        updated
    }

    /// Consecutive days with at least one newly mastered word, as of
    /// `today`. A gap of more than one day means the streak is over even if
    /// it was never reset.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        match self.last_practice_date {
            Some(last) if today - last <= Duration::days(1) => self.statistics.streak_days,
            _ => 0,
        }
    }

    fn touch_learning_day(&mut self, today: NaiveDate) {
        let streak = match self.last_practice_date {
            Some(last) if last == today => return,
            Some(last) if today - last == Duration::days(1) => self.statistics.streak_days + 1,
            _ => 1,
        };
        self.statistics.streak_days = streak;
        self.last_practice_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastery::MasteryPolicy;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    fn tracker() -> MasteryTracker {
        MasteryTracker::new(MasteryPolicy::default())
    }

    #[test]
    fn first_answer_creates_record() {
        let mut book = ProgressBook::default();
        book.record_attempt(&tracker(), "w1", false, at(1));
        let progress = book.get("w1").unwrap();
        assert_eq!(progress.incorrect_count, 1);
        assert_eq!(book.words.len(), 1);
        assert_eq!(book.statistics.total_attempts, 1);
        assert_eq!(book.statistics.total_correct, 0);
    }

    #[test]
    fn accuracy_tracks_attempts() {
        let mut book = ProgressBook::default();
        let tracker = tracker();
        book.record_attempt(&tracker, "w1", true, at(1));
        book.record_attempt(&tracker, "w1", false, at(1));
        book.record_attempt(&tracker, "w2", true, at(1));
        book.record_attempt(&tracker, "w2", true, at(1));
        assert_eq!(book.statistics.accuracy_rate(), 0.75);
        assert_eq!(book.words.len(), 2);
    }

    #[test]
    fn mastery_increments_learned_today() {
        let mut book = ProgressBook::default();
        let tracker = tracker();
        for _ in 0..3 {
            book.record_attempt(&tracker, "w1", true, at(1));
        }
        assert_eq!(book.statistics.learned_today(at(1).date_naive()), 1);
        assert_eq!(book.statistics.learned_today(at(2).date_naive()), 0);
    }

    fn master(
        book: &mut ProgressBook,
        tracker: &MasteryTracker,
        word_id: &str,
        when: DateTime<Utc>,
    ) {
        for _ in 0..3 {
            book.record_attempt(tracker, word_id, true, when);
        }
    }

    #[test]
    fn streak_counts_consecutive_mastery_days() {
        let mut book = ProgressBook::default();
        let tracker = tracker();
        master(&mut book, &tracker, "w1", at(1));
        master(&mut book, &tracker, "w2", at(1));
        master(&mut book, &tracker, "w3", at(2));
        master(&mut book, &tracker, "w4", at(3));
        assert_eq!(book.statistics.streak_days, 3);

        master(&mut book, &tracker, "w5", at(6));
        assert_eq!(book.statistics.streak_days, 1);
        assert_eq!(book.current_streak(at(7).date_naive()), 1);
        assert_eq!(book.current_streak(at(9).date_naive()), 0);
    }

    #[test]
    fn answers_without_mastery_leave_streak_alone() {
        let mut book = ProgressBook::default();
        let tracker = tracker();
        book.record_attempt(&tracker, "w1", true, at(1));
        book.record_attempt(&tracker, "w1", false, at(2));
        assert_eq!(book.statistics.streak_days, 0);
        assert_eq!(book.last_practice_date, None);

        book.record_attempt(&tracker, "w1", true, at(3));
        book.record_attempt(&tracker, "w1", true, at(3));
        assert_eq!(book.statistics.streak_days, 1);
        assert_eq!(book.last_practice_date, Some(at(3).date_naive()));
    }

    #[test]
    fn toggle_mark_round_trips() {
        let mut book = ProgressBook::default();
        let tracker = tracker();
        assert!(book.toggle_manual_mark(&tracker, "w1", at(1)).manually_marked);
        assert!(!book.toggle_manual_mark(&tracker, "w1", at(1)).manually_marked);
        assert_eq!(book.words.len(), 1);
    }

    #[test]
    fn remove_drops_record() {
        let mut book = ProgressBook::default();
        book.mark_known(&tracker(), "w1", at(1));
        assert!(book.remove("w1"));
        assert!(!book.remove("w1"));
        assert!(book.get("w1").is_none());
    }
}
