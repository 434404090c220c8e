//! Per-word mastery state machine.
//!
//! A word is Unseen until its first answer, InProgress while it collects
//! correct answers, and Mastered once `correct_count` reaches the threshold.
//! Mastered words are spaced out by the review scheduler. Repeated failures
//! demote a word without resetting its counts, so it can re-master by
//! collecting correct answers again.

use crate::scheduler::{IntervalTable, ReviewScheduler};
use crate::types::{Settings, WordProgress};
use chrono::{DateTime, Utc};

/// Thresholds that drive mastery and demotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasteryPolicy {
    pub mastery_threshold: u32,
    /// Demote once `incorrect > demotion_ratio * correct`.
    pub demotion_ratio: u32,
}

impl Default for MasteryPolicy {
    fn default() -> Self {
        Self {
            mastery_threshold: 3,
            demotion_ratio: 2,
        }
    }
}

impl MasteryPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mastery_threshold: settings.mastery_threshold,
            demotion_ratio: settings.demotion_ratio,
        }
    }
}

/// Result of recording one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub progress: WordProgress,
    /// The word crossed the mastery threshold with this answer.
    pub newly_mastered: bool,
    /// The word lost its mastery with this answer.
    pub demoted: bool,
}

/// Applies answers and manual marks to progress records.
#[derive(Debug, Clone, Default)]
pub struct MasteryTracker<S = IntervalTable> {
    pub policy: MasteryPolicy,
    pub scheduler: S,
}

impl MasteryTracker<IntervalTable> {
    pub fn new(policy: MasteryPolicy) -> Self {
        Self {
            policy,
            scheduler: IntervalTable::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(MasteryPolicy::from_settings(settings))
    }
}

impl<S: ReviewScheduler> MasteryTracker<S> {
    pub fn with_scheduler(policy: MasteryPolicy, scheduler: S) -> Self {
        Self { policy, scheduler }
    }

    /// Apply one graded answer to a progress record.
    ///
    /// A word that reaches mastery is scheduled at the scheduler's second
    /// step (`next_review(1, ..)`, 3 days with the default table), not one
    /// day out. Later correct answers use `times_reviewed` as the step.
    pub fn record_attempt(
        &self,
        progress: &WordProgress,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> AttemptOutcome {
        let mut next = progress.clone();
        let mut newly_mastered = false;
        let mut demoted = false;

        if is_correct {
            next.correct_count += 1;
            next.times_reviewed += 1;
            next.last_practiced_at = now;

            if next.is_mastered() {
                if !next.manually_marked {
                    next.next_review_at =
                        Some(self.scheduler.next_review(next.times_reviewed, now));
                }
            } else if next.correct_count >= self.policy.mastery_threshold {
                next.mastered_at = Some(now);
                if !next.manually_marked {
                    next.next_review_at = Some(self.scheduler.next_review(1, now));
                }
                newly_mastered = true;
                tracing::info!(word_id = %next.word_id, correct = next.correct_count, "word mastered");
            }
        } else {
            next.incorrect_count += 1;

            let limit = u64::from(self.policy.demotion_ratio) * u64::from(next.correct_count);
            if next.is_mastered() && u64::from(next.incorrect_count) > limit {
                next.mastered_at = None;
                next.next_review_at = None;
                demoted = true;
                tracing::info!(
                    word_id = %next.word_id,
                    correct = next.correct_count,
                    incorrect = next.incorrect_count,
                    "word demoted"
                );
            }
        }

        AttemptOutcome {
            progress: next,
            newly_mastered,
            demoted,
        }
    }

    /// Force a word to mastered and take it out of automatic scheduling.
    ///
    /// A word with no history gets `threshold` correct answers and reviews
    /// credited so its counts are consistent with mastery.
    pub fn mark_known(
        &self,
        progress: Option<&WordProgress>,
        word_id: &str,
        now: DateTime<Utc>,
    ) -> WordProgress {
        let threshold = self.policy.mastery_threshold;
        let mut marked = match progress {
            Some(existing) => existing.clone(),
            None => WordProgress {
                correct_count: threshold,
                times_reviewed: threshold,
                ..WordProgress::new(word_id, now)
            },
        };

        marked.mastered_at = Some(now);
        marked.correct_count = marked.correct_count.max(threshold);
        marked.next_review_at = None;
        marked.manually_marked = true;
        marked
    }

    /// Clear a manual mark, returning the word to the unmastered pool.
    pub fn unmark(&self, progress: &WordProgress) -> WordProgress {
        WordProgress {
            manually_marked: false,
            mastered_at: None,
            correct_count: 0,
            next_review_at: None,
            ..progress.clone()
        }
    }

    /// Flip the manual mark: unmark a marked word, mark anything else.
    pub fn toggle_manual_mark(
        &self,
        progress: Option<&WordProgress>,
        word_id: &str,
        now: DateTime<Utc>,
    ) -> WordProgress {
        match progress {
            Some(existing) if existing.manually_marked => self.unmark(existing),
            other => self.mark_known(other, word_id, now),
        }
    }
}

/// Apply one answer with the default scheduler and demotion ratio.
pub fn record_attempt(
    progress: &WordProgress,
    is_correct: bool,
    mastery_threshold: u32,
    now: DateTime<Utc>,
) -> WordProgress {
    MasteryTracker::new(MasteryPolicy {
        mastery_threshold,
        ..MasteryPolicy::default()
    })
    .record_attempt(progress, is_correct, now)
    .progress
}
