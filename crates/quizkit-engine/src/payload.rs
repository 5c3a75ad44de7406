//! Quiz payload loading and validation.
//!
//! Hosts embed the quiz payload as JSON; these helpers deserialize it and
//! offer an advisory validation pass. The engine itself assumes a well-formed
//! payload — validation exists so hosts can surface authoring mistakes
//! before wiring a quiz up.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{AnswerKey, QuizData};

/// Parse a JSON payload string into a [`QuizData`].
pub fn parse_quiz_str(content: &str) -> Result<QuizData> {
    serde_json::from_str(content).context("failed to parse quiz payload JSON")
}

/// Read and parse a JSON payload file.
pub fn load_quiz(path: &Path) -> Result<QuizData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz payload: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse quiz payload: {}", path.display()))
}

/// A warning from payload validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Effective id of the affected question, if the warning is per-question.
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz payload for common authoring issues.
pub fn validate_quiz(data: &QuizData) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if data.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "quiz has no questions".into(),
        });
    }

    // Duplicate effective ids break performance tracking.
    let mut seen_ids = std::collections::HashSet::new();
    for index in 0..data.questions.len() {
        let id = data.question_id(index);
        if !seen_ids.insert(id.clone()) {
            warnings.push(ValidationWarning {
                question_id: Some(id.clone()),
                message: format!("duplicate question id: {id}"),
            });
        }
    }

    for (position, question) in data.questions.iter().enumerate() {
        let id = data.question_id(position);
        let warn = |message: String| ValidationWarning {
            question_id: Some(id.clone()),
            message,
        };

        if !question.key.matches_kind(question.kind) {
            warnings.push(warn(format!(
                "answer key does not match question kind {}",
                question.kind
            )));
        }

        match &question.key {
            AnswerKey::Choice { index } => {
                if *index >= question.options.len() {
                    warnings.push(warn(format!(
                        "correct option index {index} out of range ({} options)",
                        question.options.len()
                    )));
                }
            }
            AnswerKey::Choices { indices } => {
                if indices.is_empty() {
                    warnings.push(warn("empty correct-index set".into()));
                }
                for i in indices {
                    if *i >= question.options.len() {
                        warnings.push(warn(format!(
                            "correct option index {i} out of range ({} options)",
                            question.options.len()
                        )));
                    }
                }
            }
            AnswerKey::Text { accepted, .. } => {
                if accepted.is_empty() {
                    warnings.push(warn("empty accepted-answer list".into()));
                }
            }
            AnswerKey::Ordering { order } => {
                if order.is_empty() {
                    warnings.push(warn("empty correct ordering".into()));
                }
                if order.len() != question.options.len() && !question.options.is_empty() {
                    warnings.push(warn(format!(
                        "ordering length {} does not match {} items",
                        order.len(),
                        question.options.len()
                    )));
                }
            }
            AnswerKey::SelfAssessed => {}
        }
    }

    warnings
}
