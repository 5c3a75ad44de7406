//! quizkit-engine — Quiz grading and navigation core.
//!
//! This crate drives one rendered quiz instance: it owns the active question
//! set, the navigation cursor, submitted-answer tracking, per-kind grading,
//! and review filtering. Every graded submission is recorded into a
//! [`quizkit_store::PerformanceStore`], and every transition emits an
//! immutable [`view::ViewState`] for the host renderer to map onto its UI.
//!
//! The engine is single-threaded and synchronous: each action runs to
//! completion before the next is accepted, and no action can fail — invalid
//! actions are no-ops or surface a [`view::Notice`].

pub mod engine;
pub mod grading;
pub mod model;
pub mod payload;
pub mod results;
pub mod session;
pub mod view;

pub use engine::QuizEngine;
pub use grading::{grade, Answer, Grade};
pub use model::{AnswerKey, Question, QuestionKind, QuizData};
pub use results::ResultsSummary;
pub use session::{AnswerRecord, Phase, ReviewMode};
pub use view::{HistoryReviewButton, NextAction, Notice, QuestionView, ViewState};
