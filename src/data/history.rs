//! Score history for the sparkline and running average.

use std::collections::VecDeque;
use std::time::Instant;

use focuswatch_types::{StatusSnapshot, MAX_CONCENTRATION_SCORE};

/// Maximum number of rendered scores to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks recent concentration scores.
///
/// Only rendered snapshots are recorded, so a child who holds a steady score
/// adds one sample rather than one per poll.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Recorded scores, oldest first.
    pub scores: VecDeque<u32>,
    timestamps: VecDeque<Instant>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the score of a rendered snapshot.
    pub fn record(&mut self, snapshot: &StatusSnapshot, at: Instant) {
        self.scores
            .push_back(snapshot.concentration_score.min(MAX_CONCENTRATION_SCORE));
        if self.scores.len() > MAX_HISTORY_SIZE {
            self.scores.pop_front();
        }

        self.timestamps.push_back(at);
        if self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores as sparkline values.
    pub fn sparkline(&self) -> Vec<u64> {
        self.scores.iter().map(|&s| u64::from(s)).collect()
    }

    /// Mean of the recorded scores.
    ///
    /// Returns None if nothing has been recorded yet.
    pub fn average(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let total: u64 = self.scores.iter().map(|&s| u64::from(s)).sum();
        Some(total as f64 / self.scores.len() as f64)
    }

    /// Difference between the last two scores.
    pub fn trend(&self) -> Option<i64> {
        let len = self.scores.len();
        if len < 2 {
            return None;
        }
        let current = *self.scores.back()?;
        let previous = *self.scores.get(len - 2)?;
        Some(i64::from(current) - i64::from(previous))
    }

    /// Time between the oldest and newest recorded samples.
    pub fn span(&self) -> Option<std::time::Duration> {
        let first = self.timestamps.front()?;
        let last = self.timestamps.back()?;
        Some(last.duration_since(*first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focuswatch_types::{FocusStatus, GazeStatus};
    use std::time::Duration;

    fn snapshot(score: u32) -> StatusSnapshot {
        StatusSnapshot::new(FocusStatus::Focusing, score, GazeStatus::Center, true)
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.average(), None);
        assert_eq!(history.trend(), None);
        assert!(history.sparkline().is_empty());
    }

    #[test]
    fn test_average_and_trend() {
        let mut history = History::new();
        let t0 = Instant::now();
        history.record(&snapshot(80), t0);
        history.record(&snapshot(90), t0 + Duration::from_secs(1));
        history.record(&snapshot(70), t0 + Duration::from_secs(2));

        assert_eq!(history.average(), Some(80.0));
        assert_eq!(history.trend(), Some(-20));
        assert_eq!(history.sparkline(), vec![80, 90, 70]);
        assert_eq!(history.span(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        let t0 = Instant::now();
        for i in 0..100 {
            history.record(&snapshot(i), t0);
        }
        assert_eq!(history.scores.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.timestamps.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.scores.front(), Some(&40));
    }

    #[test]
    fn test_scores_are_clamped() {
        let mut history = History::new();
        history.record(&snapshot(250), Instant::now());
        assert_eq!(history.sparkline(), vec![100]);
    }
}
