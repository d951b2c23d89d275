//! Text similarity scoring.
//!
//! [`levenshtein`] is the exact scorer used for whole files and for each
//! streamed chunk pair. [`ScoreAccumulator`] folds per-chunk scores into a
//! plain arithmetic mean without keeping the scores around.

pub mod levenshtein;

pub use levenshtein::{distance, similarity};

/// Running mean over chunk similarity scores.
///
/// Holds only a sum and a count, so memory stays constant however many
/// chunks a large file pair produces. Every chunk counts equally regardless
/// of its length.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreAccumulator {
    sum: f64,
    count: u64,
}

impl ScoreAccumulator {
    pub const fn new() -> Self {
        Self { sum: 0.0, count: 0 }
    }

    pub fn push(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean of the pushed scores, or 0.0 when nothing was pushed.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }
}
