//! Core data model for quiz content.
//!
//! These types represent the externally supplied, read-only quiz payload: the
//! questions, their kinds, and their kind-specific grading keys. The engine
//! consumes this contract; it does not own authoring or layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Mcq,
    MultipleSelect,
    TrueFalse,
    FillBlank,
    CodeOutput,
    CodeCompletion,
    Flashcard,
    DragDrop,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::MultipleSelect => "multiple-select",
            QuestionKind::TrueFalse => "true-false",
            QuestionKind::FillBlank => "fill-blank",
            QuestionKind::CodeOutput => "code-output",
            QuestionKind::CodeCompletion => "code-completion",
            QuestionKind::Flashcard => "flashcard",
            QuestionKind::DragDrop => "drag-drop",
        };
        write!(f, "{name}")
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq" => Ok(QuestionKind::Mcq),
            "multiple-select" => Ok(QuestionKind::MultipleSelect),
            "true-false" => Ok(QuestionKind::TrueFalse),
            "fill-blank" => Ok(QuestionKind::FillBlank),
            "code-output" => Ok(QuestionKind::CodeOutput),
            "code-completion" => Ok(QuestionKind::CodeCompletion),
            "flashcard" => Ok(QuestionKind::Flashcard),
            "drag-drop" => Ok(QuestionKind::DragDrop),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// Kind-specific grading key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnswerKey {
    /// Single correct option index (mcq, true-false, code-output).
    Choice { index: usize },
    /// Set of correct option indices (multiple-select). Order irrelevant.
    Choices { indices: Vec<usize> },
    /// Accepted-answer strings (fill-blank, code-completion).
    Text {
        accepted: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },
    /// Correct permutation of item ids, position by position (drag-drop).
    Ordering { order: Vec<u32> },
    /// No automatic key: the learner self-reports (flashcard).
    SelfAssessed,
}

impl AnswerKey {
    /// Whether this key shape is the one `kind` grades with.
    pub fn matches_kind(&self, kind: QuestionKind) -> bool {
        matches!(
            (kind, self),
            (
                QuestionKind::Mcq | QuestionKind::TrueFalse | QuestionKind::CodeOutput,
                AnswerKey::Choice { .. }
            ) | (QuestionKind::MultipleSelect, AnswerKey::Choices { .. })
                | (
                    QuestionKind::FillBlank | QuestionKind::CodeCompletion,
                    AnswerKey::Text { .. }
                )
                | (QuestionKind::Flashcard, AnswerKey::SelfAssessed)
                | (QuestionKind::DragDrop, AnswerKey::Ordering { .. })
        )
    }
}

/// A single question as supplied by the host page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier; optional, see [`QuizData::question_id`] for the
    /// positional fallback.
    #[serde(default)]
    pub id: Option<String>,
    /// Question kind.
    pub kind: QuestionKind,
    /// Question text.
    pub prompt: String,
    /// Option or item labels, in authored order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Grading key.
    pub key: AnswerKey,
    /// Optional hint text, revealed on demand.
    #[serde(default)]
    pub hint: Option<String>,
}

/// The per-quiz-instance payload: a quiz id and its questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizData {
    /// Identifier of this quiz instance, used to namespace fallback question
    /// ids.
    pub id: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuizData {
    /// Number of questions in the payload.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Effective id of the question at `index`: its declared id, or
    /// `{quiz_id}-{index}` when none was assigned.
    pub fn question_id(&self, index: usize) -> String {
        self.questions
            .get(index)
            .and_then(|q| q.id.clone())
            .unwrap_or_else(|| format!("{}-{index}", self.id))
    }
}
