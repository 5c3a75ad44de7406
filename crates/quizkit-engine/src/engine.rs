//! The quiz state machine.
//!
//! One [`QuizEngine`] drives one rendered quiz instance through navigation,
//! grading, review filtering, and results computation. The host forwards
//! discrete user actions; each action runs to completion, records graded
//! submissions into the performance store, and returns the [`ViewState`] the
//! renderer should now display. Invalid actions are no-ops — the engine has
//! no fatal error conditions.

use quizkit_store::{LastResult, PerformanceStore};
use uuid::Uuid;

use crate::grading::{grade, Answer};
use crate::model::QuizData;
use crate::results::ResultsSummary;
use crate::session::{AnswerRecord, Phase, QuizSession, ResultsScope, ReviewMode};
use crate::view::{
    CurrentQuestion, HistoryReviewButton, NavState, NextAction, Notice, QuestionView, ViewState,
};

/// Stateful controller for one quiz instance.
pub struct QuizEngine {
    data: QuizData,
    session: QuizSession,
    store: PerformanceStore,
    instance: Uuid,
}

impl QuizEngine {
    /// Initialize over `data`, entering `Active` at the first question with
    /// the full question set in scope.
    pub fn new(data: QuizData, store: PerformanceStore) -> Self {
        let session = QuizSession::fresh(data.len());
        let instance = Uuid::new_v4();
        tracing::debug!(
            %instance,
            quiz = %data.id,
            questions = data.len(),
            persistent = store.is_persistent(),
            "quiz initialized"
        );
        Self {
            data,
            session,
            store,
            instance,
        }
    }

    /// The quiz payload this engine drives.
    pub fn data(&self) -> &QuizData {
        &self.data
    }

    /// Read access to the performance store.
    pub fn store(&self) -> &PerformanceStore {
        &self.store
    }

    /// Session answer state for the question at `position`.
    pub fn record(&self, position: usize) -> Option<&AnswerRecord> {
        self.session.records.get(position)
    }

    /// The current view-state snapshot, without acting.
    pub fn view_state(&self) -> ViewState {
        self.project(None)
    }

    /// Grade the question at `position` against `answer`.
    ///
    /// Valid only while `Active` and only for a question not yet submitted
    /// this session; otherwise a no-op. A graded submission is recorded into
    /// the performance store and locks the question. Idempotent: repeated
    /// submissions leave both the session verdict and the persisted counters
    /// unchanged.
    pub fn submit_answer(&mut self, position: usize, answer: Answer) -> ViewState {
        if self.session.phase != Phase::Active {
            return self.view_state();
        }
        let Some(question) = self.data.questions.get(position) else {
            return self.view_state();
        };
        if self.session.records[position].submitted {
            tracing::debug!(instance = %self.instance, position, "already submitted, ignoring");
            return self.view_state();
        }

        let outcome = grade(question, &answer);
        let question_id = self.data.question_id(position);
        self.store.record(&question_id, outcome.correct);
        tracing::debug!(
            instance = %self.instance,
            position,
            question = %question_id,
            correct = outcome.correct,
            "answer graded"
        );

        let record = &mut self.session.records[position];
        record.submitted = true;
        record.answer = Some(answer);
        record.correct = Some(outcome.correct);
        record.marks = outcome.marks;

        self.view_state()
    }

    /// Move the cursor forward within the in-scope questions. No-op at the
    /// end.
    pub fn next(&mut self) -> ViewState {
        if self.session.phase == Phase::Active && self.session.cursor + 1 < self.session.visible.len()
        {
            self.session.cursor += 1;
        }
        self.view_state()
    }

    /// Move the cursor backward. No-op at the start.
    pub fn previous(&mut self) -> ViewState {
        if self.session.phase == Phase::Active && self.session.cursor > 0 {
            self.session.cursor -= 1;
        }
        self.view_state()
    }

    /// Compute and show aggregate results.
    ///
    /// Only reachable from the last in-scope question; otherwise a no-op.
    /// Scans the in-scope positions (the review subset when one is active,
    /// else every question), classifying each as correct, incorrect, or
    /// skipped, and captures the incorrect positions as the session retry
    /// set.
    pub fn show_results(&mut self) -> ViewState {
        if self.session.phase != Phase::Active || !self.session.at_last() {
            return self.view_state();
        }

        let indices: Vec<usize> = match self.session.results_scope {
            ResultsScope::Subset => self.session.results_indices.clone(),
            ResultsScope::All => (0..self.data.len()).collect(),
        };

        let mut summary = ResultsSummary {
            total: indices.len(),
            ..ResultsSummary::default()
        };
        let mut incorrect_positions = Vec::new();
        for &position in &indices {
            let record = &self.session.records[position];
            if record.submitted && record.correct == Some(true) {
                summary.correct += 1;
            } else if record.submitted {
                summary.incorrect += 1;
                incorrect_positions.push(position);
            } else {
                summary.skipped += 1;
            }
        }

        tracing::debug!(
            instance = %self.instance,
            correct = summary.correct,
            incorrect = summary.incorrect,
            skipped = summary.skipped,
            percentage = summary.percentage(),
            "results shown"
        );

        self.session.results = Some(summary);
        self.session.last_incorrect = incorrect_positions;
        self.session.phase = Phase::ResultsShown;
        self.view_state()
    }

    /// Start the quiz over: clear every answer record, restore the full
    /// question set, return to the first question. Performance history is
    /// untouched and persists across resets.
    pub fn reset(&mut self) -> ViewState {
        tracing::debug!(instance = %self.instance, "quiz reset");
        self.session = QuizSession::fresh(self.data.len());
        self.view_state()
    }

    /// Begin a review pass over exactly `positions` (order preserved).
    ///
    /// Valid from either phase. An empty set surfaces
    /// [`Notice::NothingToReview`] without changing state. Otherwise the
    /// answer records of the given positions are cleared for retry, the
    /// scope narrows to them, and the engine returns to `Active` at the
    /// first.
    pub fn start_review(&mut self, positions: &[usize]) -> ViewState {
        if positions.is_empty() {
            tracing::debug!(instance = %self.instance, "nothing to review");
            return self.project(Some(Notice::NothingToReview));
        }
        self.enter_subset(positions, ReviewMode::RetrySessionIncorrect)
    }

    /// Retry the questions graded incorrect in this session's last results.
    pub fn review_session_incorrect(&mut self) -> ViewState {
        let positions = self.session.last_incorrect.clone();
        self.start_review(&positions)
    }

    /// Toggle the review pass over historically incorrect questions.
    ///
    /// Entering collects every question whose stored history ends in an
    /// incorrect answer; an empty set surfaces a notice without changing
    /// state. Toggling while already in the pass restores the full question
    /// set.
    pub fn toggle_history_review(&mut self) -> ViewState {
        if self.session.review_mode == ReviewMode::RetryHistoryIncorrect {
            return self.restore_full();
        }

        let positions = self.history_incorrect_positions();
        if positions.is_empty() {
            tracing::debug!(instance = %self.instance, "no past incorrect questions");
            return self.project(Some(Notice::NothingToReview));
        }
        self.enter_subset(&positions, ReviewMode::RetryHistoryIncorrect)
    }

    /// Reveal or hide the hint for the question at `position`. Degrades
    /// silently when the question has no hint.
    pub fn toggle_hint(&mut self, position: usize) -> ViewState {
        if self.session.phase == Phase::Active {
            let has_hint = self
                .data
                .questions
                .get(position)
                .is_some_and(|q| q.hint.is_some());
            if has_hint {
                let record = &mut self.session.records[position];
                record.hint_open = !record.hint_open;
            }
        }
        self.view_state()
    }

    fn enter_subset(&mut self, positions: &[usize], mode: ReviewMode) -> ViewState {
        for &position in positions {
            if let Some(record) = self.session.records.get_mut(position) {
                *record = AnswerRecord::default();
            }
        }
        self.session.visible = positions.to_vec();
        self.session.cursor = 0;
        self.session.review_mode = mode;
        self.session.results_scope = ResultsScope::Subset;
        self.session.results_indices = positions.to_vec();
        self.session.phase = Phase::Active;
        self.session.results = None;
        tracing::debug!(
            instance = %self.instance,
            mode = ?mode,
            in_scope = positions.len(),
            "review pass started"
        );
        self.view_state()
    }

    /// Widen the scope back to the full question set without touching answer
    /// records.
    fn restore_full(&mut self) -> ViewState {
        self.session.visible = (0..self.data.len()).collect();
        self.session.cursor = 0;
        self.session.review_mode = ReviewMode::All;
        self.session.results_scope = ResultsScope::All;
        self.session.results_indices.clear();
        self.session.phase = Phase::Active;
        self.session.results = None;
        self.view_state()
    }

    fn history_incorrect_positions(&self) -> Vec<usize> {
        (0..self.data.len())
            .filter(|&position| {
                self.store
                    .get(&self.data.question_id(position))
                    .is_some_and(|entry| entry.last_result == LastResult::Incorrect)
            })
            .collect()
    }

    fn project(&self, notice: Option<Notice>) -> ViewState {
        let session = &self.session;
        let active = session.phase == Phase::Active;
        let current_position = session.current_position();

        let current = if active {
            current_position.map(|position| CurrentQuestion {
                ordinal: session.cursor + 1,
                position,
            })
        } else {
            None
        };

        let questions = (0..self.data.len())
            .map(|position| {
                let record = &session.records[position];
                QuestionView {
                    visible: active && current_position == Some(position),
                    locked: record.submitted,
                    outcome: record.correct,
                    weak: self.store.is_weak(&self.data.question_id(position)),
                    hint_open: record.hint_open,
                    marks: record.marks.clone(),
                }
            })
            .collect();

        let nav = NavState {
            prev_enabled: active && session.cursor > 0 && !session.visible.is_empty(),
            next_action: if session.at_last() {
                NextAction::ShowResults
            } else {
                NextAction::Next
            },
            next_enabled: active && !session.visible.is_empty(),
        };

        let history_review = if session.review_mode == ReviewMode::RetryHistoryIncorrect {
            HistoryReviewButton::ShowAll
        } else {
            match self.history_incorrect_positions().len() {
                0 => HistoryReviewButton::Disabled,
                count => HistoryReviewButton::Review { count },
            }
        };

        ViewState {
            phase: session.phase,
            review_mode: session.review_mode,
            current,
            in_scope: session.visible.len(),
            total: self.data.len(),
            answered: session.answered_count(),
            questions,
            nav,
            results: session.results,
            session_retry_count: session.last_incorrect.len(),
            history_review,
            notice,
        }
    }
}
