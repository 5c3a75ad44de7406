//! Aggregate results for a completed pass.

use serde::{Deserialize, Serialize};

/// Classification counts over the in-scope questions at results time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub skipped: usize,
}

impl ResultsSummary {
    /// Score percentage over *answered* questions only — skipped questions
    /// never dilute the score. 0 when nothing was answered.
    pub fn percentage(&self) -> u32 {
        let answered = self.correct + self.incorrect;
        if answered == 0 {
            return 0;
        }
        (self.correct as f64 / answered as f64 * 100.0).round() as u32
    }
}
