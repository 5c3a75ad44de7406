//! Persisted ledger types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the most recent grading of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastResult {
    Correct,
    Incorrect,
}

/// Attempt history for a single question id.
///
/// Invariants maintained by [`PerformanceEntry::updated`]:
/// - `correct + incorrect == attempts`
/// - `streak > 0` iff `last_result == Correct`, `streak < 0` iff
///   `last_result == Incorrect`; the magnitude is the length of the current
///   run of same-type results and re-seeds to ±1 when the result flips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub attempts: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub streak: i32,
    pub last_result: LastResult,
    pub last_attempt_at: DateTime<Utc>,
}

impl PerformanceEntry {
    /// The entry after one more graded result, starting from `prev` (or from
    /// zeroed counters when the question has never been graded).
    pub fn updated(prev: Option<&PerformanceEntry>, is_correct: bool, now: DateTime<Utc>) -> Self {
        let (attempts, correct, incorrect, streak) = prev
            .map(|e| (e.attempts, e.correct, e.incorrect, e.streak))
            .unwrap_or((0, 0, 0, 0));

        if is_correct {
            Self {
                attempts: attempts + 1,
                correct: correct + 1,
                incorrect,
                streak: if streak > 0 { streak + 1 } else { 1 },
                last_result: LastResult::Correct,
                last_attempt_at: now,
            }
        } else {
            Self {
                attempts: attempts + 1,
                correct,
                incorrect: incorrect + 1,
                streak: if streak < 0 { streak - 1 } else { -1 },
                last_result: LastResult::Incorrect,
                last_attempt_at: now,
            }
        }
    }

    /// Fraction of attempts graded correct, 0.0 for an unattempted entry.
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempts)
        }
    }

    /// Whether this question deserves a weak-question hint.
    ///
    /// Fewer than 2 attempts is insufficient signal. Otherwise weak means
    /// below-half accuracy, or two or more consecutive incorrect answers even
    /// when overall accuracy is borderline.
    pub fn is_weak(&self) -> bool {
        self.attempts >= 2 && (self.accuracy() < 0.5 || self.streak <= -2)
    }
}

/// The full persisted document: one entry per question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub questions: HashMap<String, PerformanceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_sequence(results: &[bool]) -> PerformanceEntry {
        let now = Utc::now();
        let mut entry: Option<PerformanceEntry> = None;
        for &r in results {
            entry = Some(PerformanceEntry::updated(entry.as_ref(), r, now));
        }
        entry.expect("sequence must be non-empty")
    }

    #[test]
    fn counters_sum_to_attempts() {
        let sequences: &[&[bool]] = &[
            &[true],
            &[false],
            &[true, true, false],
            &[false, false, true, false, true, true],
            &[true, false, true, false, true, false, true, false],
        ];
        for seq in sequences {
            let entry = apply_sequence(seq);
            assert_eq!(entry.correct + entry.incorrect, entry.attempts);
            assert_eq!(entry.attempts as usize, seq.len());
        }
    }

    #[test]
    fn streak_extends_while_result_repeats() {
        let entry = apply_sequence(&[true, true, true]);
        assert_eq!(entry.streak, 3);
        assert_eq!(entry.last_result, LastResult::Correct);

        let entry = apply_sequence(&[false, false]);
        assert_eq!(entry.streak, -2);
        assert_eq!(entry.last_result, LastResult::Incorrect);
    }

    #[test]
    fn streak_reseeds_on_flip() {
        let entry = apply_sequence(&[true, true, true, false]);
        assert_eq!(entry.streak, -1);
        assert_eq!(entry.last_result, LastResult::Incorrect);

        let entry = apply_sequence(&[false, false, false, true]);
        assert_eq!(entry.streak, 1);
        assert_eq!(entry.last_result, LastResult::Correct);
    }

    #[test]
    fn streak_sign_always_matches_last_result() {
        // Exhaustive over all result sequences of length 6.
        for bits in 0u32..64 {
            let seq: Vec<bool> = (0..6).map(|i| bits & (1 << i) != 0).collect();
            let entry = apply_sequence(&seq);
            match entry.last_result {
                LastResult::Correct => assert!(entry.streak > 0, "seq {seq:?}"),
                LastResult::Incorrect => assert!(entry.streak < 0, "seq {seq:?}"),
            }
        }
    }

    #[test]
    fn weak_needs_two_attempts() {
        let entry = apply_sequence(&[false]);
        assert!(!entry.is_weak());
    }

    #[test]
    fn weak_on_low_accuracy() {
        let entry = apply_sequence(&[false, true, false]);
        assert!(entry.accuracy() < 0.5);
        assert!(entry.is_weak());
    }

    #[test]
    fn weak_on_incorrect_run_despite_accuracy() {
        // 3/5 correct overall, but the last two were incorrect.
        let entry = apply_sequence(&[true, true, true, false, false]);
        assert!(entry.accuracy() >= 0.5);
        assert_eq!(entry.streak, -2);
        assert!(entry.is_weak());
    }

    #[test]
    fn not_weak_on_healthy_history() {
        let entry = apply_sequence(&[true, true, false, true]);
        assert!(!entry.is_weak());
    }

    #[test]
    fn ledger_serde_roundtrip() {
        let now = Utc::now();
        let mut ledger = Ledger::default();
        ledger.questions.insert(
            "rust-basics-0".into(),
            PerformanceEntry::updated(None, true, now),
        );
        ledger.questions.insert(
            "rust-basics-1".into(),
            PerformanceEntry::updated(None, false, now),
        );

        let json = serde_json::to_string(&ledger).unwrap();
        let loaded: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, ledger);
    }
}
