//! In-memory session state for one rendered quiz.
//!
//! A [`QuizSession`] is exclusively owned and mutated by
//! [`crate::QuizEngine`]; its scope bookkeeping is rebuilt whenever a review
//! filter changes which questions are in play.

use serde::{Deserialize, Serialize};

use crate::grading::Answer;
use crate::results::ResultsSummary;

/// Which pass over the questions the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewMode {
    /// The full question set.
    All,
    /// Retrying the questions graded incorrect earlier this session.
    RetrySessionIncorrect,
    /// Retrying the questions whose stored history ends in an incorrect
    /// answer.
    RetryHistoryIncorrect,
}

/// Whether final scoring counts every question or only the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultsScope {
    All,
    Subset,
}

/// The engine's two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// A question is on screen; navigation and submission are live.
    Active,
    /// The aggregate results panel is on screen.
    ResultsShown,
}

/// Session-scoped answer state for one question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerRecord {
    /// Has this question been graded this session. Once set, inputs are
    /// locked and re-submission is a no-op.
    pub submitted: bool,
    /// The input that was graded.
    pub answer: Option<Answer>,
    /// Verdict of the last grading.
    pub correct: Option<bool>,
    /// Per-option feedback from the last grading.
    pub marks: Vec<Option<bool>>,
    /// Whether the hint is currently revealed.
    pub hint_open: bool,
}

/// Mutable state of one quiz instance.
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// In-scope question positions, in display order.
    pub visible: Vec<usize>,
    /// Cursor into `visible`.
    pub cursor: usize,
    pub review_mode: ReviewMode,
    pub results_scope: ResultsScope,
    /// The positions final scoring ranges over when `results_scope` is
    /// `Subset`.
    pub results_indices: Vec<usize>,
    pub phase: Phase,
    /// One record per question, indexed by base position.
    pub records: Vec<AnswerRecord>,
    /// In-scope positions graded incorrect by the most recent results
    /// computation.
    pub last_incorrect: Vec<usize>,
    /// Aggregate results; only meaningful in `Phase::ResultsShown`.
    pub results: Option<ResultsSummary>,
}

impl QuizSession {
    /// A fresh session over the full question set.
    pub fn fresh(question_count: usize) -> Self {
        Self {
            visible: (0..question_count).collect(),
            cursor: 0,
            review_mode: ReviewMode::All,
            results_scope: ResultsScope::All,
            results_indices: Vec::new(),
            phase: Phase::Active,
            records: vec![AnswerRecord::default(); question_count],
            last_incorrect: Vec::new(),
            results: None,
        }
    }

    /// Base position of the question under the cursor.
    pub fn current_position(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    /// Whether the cursor sits on the last in-scope question.
    pub fn at_last(&self) -> bool {
        !self.visible.is_empty() && self.cursor + 1 == self.visible.len()
    }

    /// Number of questions submitted this session, across all scopes.
    pub fn answered_count(&self) -> usize {
        self.records.iter().filter(|r| r.submitted).count()
    }
}
