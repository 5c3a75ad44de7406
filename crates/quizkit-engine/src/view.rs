//! The immutable view-state value emitted after every engine transition.
//!
//! This is the engine's only output channel: a renderer (out of core scope)
//! maps it onto whatever UI toolkit the host uses. Nothing in here refers
//! back into the engine.

use serde::{Deserialize, Serialize};

use crate::results::ResultsSummary;
use crate::session::{Phase, ReviewMode};

/// Transient, user-visible condition raised by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notice {
    /// A review pass was requested over an empty question set.
    NothingToReview,
}

/// What the primary navigation button does next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NextAction {
    Next,
    ShowResults,
}

impl NextAction {
    /// Button label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            NextAction::Next => "Next →",
            NextAction::ShowResults => "View Results",
        }
    }
}

/// Navigation control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub prev_enabled: bool,
    pub next_action: NextAction,
    pub next_enabled: bool,
}

/// State of the history-review toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum HistoryReviewButton {
    /// No historically incorrect questions to review.
    Disabled,
    /// Offer a review pass over `count` historically incorrect questions.
    Review { count: usize },
    /// Currently in the history-review pass; offer the way back.
    ShowAll,
}

impl HistoryReviewButton {
    pub fn enabled(&self) -> bool {
        !matches!(self, HistoryReviewButton::Disabled)
    }

    /// Button label for this state.
    pub fn label(&self) -> String {
        match self {
            HistoryReviewButton::Disabled => "Review Past Incorrect".to_string(),
            HistoryReviewButton::Review { count } => format!("Review Past Incorrect ({count})"),
            HistoryReviewButton::ShowAll => "Show All Questions".to_string(),
        }
    }
}

/// The question under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentQuestion {
    /// 1-based ordinal within the in-scope sequence, for "question x of y"
    /// displays.
    pub ordinal: usize,
    /// Base position within the full question set.
    pub position: usize,
}

/// Declarative per-question display state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    /// Whether this question is the one on screen.
    pub visible: bool,
    /// Submitted this session; inputs no longer mutable.
    pub locked: bool,
    /// Verdict of the grading, once submitted.
    pub outcome: Option<bool>,
    /// Weak-question marker from the performance history.
    pub weak: bool,
    /// Whether the hint is revealed.
    pub hint_open: bool,
    /// Per-option feedback marks from the grading.
    pub marks: Vec<Option<bool>>,
}

/// Immutable snapshot of everything the renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub phase: Phase,
    pub review_mode: ReviewMode,
    /// The question under the cursor; `None` when the scope is empty or
    /// results are shown.
    pub current: Option<CurrentQuestion>,
    /// Number of in-scope questions.
    pub in_scope: usize,
    /// Total questions in the quiz.
    pub total: usize,
    /// Questions submitted this session.
    pub answered: usize,
    /// One entry per question, indexed by base position.
    pub questions: Vec<QuestionView>,
    pub nav: NavState,
    /// Aggregate results; present only in `Phase::ResultsShown`.
    pub results: Option<ResultsSummary>,
    /// How many questions the session-incorrect retry pass would cover.
    pub session_retry_count: usize,
    pub history_review: HistoryReviewButton,
    /// Transient condition raised by the action that produced this state.
    pub notice: Option<Notice>,
}
