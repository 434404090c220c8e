//! Spaced review scheduling for mastered words.

use chrono::{DateTime, Duration, Utc};

/// Review intervals in days, indexed by review count and clamped at the end.
pub const DEFAULT_INTERVALS: [u32; 5] = [1, 3, 7, 14, 30];

/// Trait for review scheduling policies.
pub trait ReviewScheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Days until the next review after `times_reviewed` reviews.
    fn interval_days(&self, times_reviewed: u32) -> u32;

    /// Timestamp of the next review.
    fn next_review(&self, times_reviewed: u32, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(i64::from(self.interval_days(times_reviewed)))
    }
}

/// Fixed interval table: `intervals[min(times_reviewed, len - 1)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    intervals: Vec<u32>,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl IntervalTable {
    /// Build a table from intervals in days. Returns `None` when empty.
    pub fn new(intervals: Vec<u32>) -> Option<Self> {
        if intervals.is_empty() {
            None
        } else {
            Some(Self { intervals })
        }
    }

    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }
}

impl ReviewScheduler for IntervalTable {
    fn name(&self) -> &'static str {
        "interval_table"
    }

    fn interval_days(&self, times_reviewed: u32) -> u32 {
        let last = self.intervals.len() - 1;
        let index = usize::try_from(times_reviewed).map_or(last, |n| n.min(last));
        self.intervals[index]
    }
}

/// Next review time using the default interval table.
pub fn compute_next_review(times_reviewed: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    IntervalTable::default().next_review(times_reviewed, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_review_is_one_day_out() {
        let now = Utc::now();
        assert_eq!(compute_next_review(0, now), now + Duration::days(1));
    }

    #[test]
    fn intervals_clamp_at_thirty_days() {
        let now = Utc::now();
        assert_eq!(compute_next_review(4, now), now + Duration::days(30));
        assert_eq!(compute_next_review(10, now), now + Duration::days(30));
        assert_eq!(compute_next_review(u32::MAX, now), now + Duration::days(30));
    }

    #[test]
    fn intervals_never_shrink() {
        let table = IntervalTable::default();
        let days: Vec<u32> = (0..8).map(|n| table.interval_days(n)).collect();
        assert_eq!(days, vec![1, 3, 7, 14, 30, 30, 30, 30]);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(IntervalTable::new(vec![]).is_none());
        let custom = IntervalTable::new(vec![2, 5]).unwrap();
        assert_eq!(custom.interval_days(9), 5);
    }
}
