//! Per-kind grading rules.
//!
//! Grading is a pure function of the question's answer key and the user's
//! input at submit time. Submitting with nothing selected grades incorrect,
//! never rejects. Alongside the overall verdict, each grade carries a
//! per-option feedback signal for highlighting.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerKey, Question};

/// User input for one question, captured by the host at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Answer {
    /// Selected option, or `None` when nothing was chosen (mcq, true-false,
    /// code-output).
    Choice { selected: Option<usize> },
    /// Selected option indices (multiple-select).
    Choices { selected: Vec<usize> },
    /// Typed input (fill-blank, code-completion).
    Text { input: String },
    /// The learner's self-reported verdict after viewing the answer face
    /// (flashcard).
    SelfAssessment { correct: bool },
    /// Final item ordering by item id (drag-drop).
    Ordering { order: Vec<u32> },
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Overall verdict.
    pub correct: bool,
    /// Per-slot feedback: one entry per option (choice kinds), per item slot
    /// (drag-drop), or a single entry for the text input. `None` means the
    /// slot is left unmarked.
    pub marks: Vec<Option<bool>>,
}

impl Grade {
    fn incorrect() -> Self {
        Self::default()
    }
}

/// Grade `answer` against `question`'s key.
///
/// An answer whose shape does not match the key (a host wiring mistake)
/// grades incorrect with no marks rather than failing.
pub fn grade(question: &Question, answer: &Answer) -> Grade {
    match (&question.key, answer) {
        (AnswerKey::Choice { index }, Answer::Choice { selected }) => {
            grade_single_choice(question.options.len(), *index, *selected)
        }
        (AnswerKey::Choices { indices }, Answer::Choices { selected }) => {
            grade_multiple_select(question.options.len(), indices, selected)
        }
        (
            AnswerKey::Text {
                accepted,
                case_sensitive,
            },
            Answer::Text { input },
        ) => grade_text(accepted, *case_sensitive, input),
        (AnswerKey::SelfAssessed, Answer::SelfAssessment { correct }) => Grade {
            correct: *correct,
            marks: Vec::new(),
        },
        (AnswerKey::Ordering { order }, Answer::Ordering { order: current }) => {
            grade_ordering(order, current)
        }
        _ => Grade::incorrect(),
    }
}

/// Exactly one choice; correct iff it is the keyed index. Only the selected
/// option is marked.
fn grade_single_choice(option_count: usize, key: usize, selected: Option<usize>) -> Grade {
    let mut marks = vec![None; option_count];
    let Some(chosen) = selected else {
        return Grade {
            correct: false,
            marks,
        };
    };
    let correct = chosen == key;
    if let Some(mark) = marks.get_mut(chosen) {
        *mark = Some(correct);
    }
    Grade { correct, marks }
}

/// Correct iff the selected set exactly equals the keyed set, order
/// irrelevant. Every option is marked by whether its checked state matches
/// the key.
fn grade_multiple_select(option_count: usize, key: &[usize], selected: &[usize]) -> Grade {
    let want: std::collections::HashSet<usize> = key.iter().copied().collect();
    let got: std::collections::HashSet<usize> = selected.iter().copied().collect();
    let correct = want == got;
    let marks = (0..option_count)
        .map(|i| Some(want.contains(&i) == got.contains(&i)))
        .collect();
    Grade { correct, marks }
}

/// Correct iff the trimmed input matches any accepted answer.
///
/// Case-insensitive mode folds both sides with `str::to_lowercase` — a plain
/// Unicode lowercase fold with no further normalization, matching the
/// locale-naive comparison quiz authors expect.
fn grade_text(accepted: &[String], case_sensitive: bool, input: &str) -> Grade {
    let trimmed = input.trim();
    let correct = if case_sensitive {
        accepted.iter().any(|a| a == trimmed)
    } else {
        let folded = trimmed.to_lowercase();
        accepted.iter().any(|a| a.to_lowercase() == folded)
    };
    Grade {
        correct,
        marks: vec![Some(correct)],
    }
}

/// Correct iff the current ordering equals the keyed permutation position by
/// position. Each slot is marked individually.
fn grade_ordering(key: &[u32], current: &[u32]) -> Grade {
    let correct = key == current;
    let marks = key
        .iter()
        .enumerate()
        .map(|(i, want)| current.get(i).map(|got| got == want))
        .collect();
    Grade { correct, marks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionKind;

    fn question(kind: QuestionKind, options: &[&str], key: AnswerKey) -> Question {
        Question {
            id: None,
            kind,
            prompt: "?".into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            key,
            hint: None,
        }
    }

    #[test]
    fn mcq_correct_choice() {
        let q = question(
            QuestionKind::Mcq,
            &["a", "b", "c"],
            AnswerKey::Choice { index: 1 },
        );
        let g = grade(&q, &Answer::Choice { selected: Some(1) });
        assert!(g.correct);
        assert_eq!(g.marks, vec![None, Some(true), None]);
    }

    #[test]
    fn mcq_wrong_choice_marks_only_selection() {
        let q = question(
            QuestionKind::Mcq,
            &["a", "b", "c"],
            AnswerKey::Choice { index: 1 },
        );
        let g = grade(&q, &Answer::Choice { selected: Some(2) });
        assert!(!g.correct);
        assert_eq!(g.marks, vec![None, None, Some(false)]);
    }

    #[test]
    fn nothing_selected_grades_incorrect() {
        let q = question(
            QuestionKind::TrueFalse,
            &["True", "False"],
            AnswerKey::Choice { index: 0 },
        );
        let g = grade(&q, &Answer::Choice { selected: None });
        assert!(!g.correct);
        assert_eq!(g.marks, vec![None, None]);
    }

    #[test]
    fn multiple_select_order_irrelevant() {
        let q = question(
            QuestionKind::MultipleSelect,
            &["a", "b", "c", "d"],
            AnswerKey::Choices {
                indices: vec![0, 2],
            },
        );
        let g = grade(
            &q,
            &Answer::Choices {
                selected: vec![2, 0],
            },
        );
        assert!(g.correct);
        assert_eq!(
            g.marks,
            vec![Some(true), Some(true), Some(true), Some(true)]
        );
    }

    #[test]
    fn multiple_select_subset_is_incorrect() {
        let q = question(
            QuestionKind::MultipleSelect,
            &["a", "b", "c"],
            AnswerKey::Choices {
                indices: vec![0, 2],
            },
        );
        let g = grade(&q, &Answer::Choices { selected: vec![0] });
        assert!(!g.correct);
        // Option 2 should have been checked and was not.
        assert_eq!(g.marks, vec![Some(true), Some(true), Some(false)]);
    }

    #[test]
    fn multiple_select_superset_is_incorrect() {
        let q = question(
            QuestionKind::MultipleSelect,
            &["a", "b", "c"],
            AnswerKey::Choices { indices: vec![0] },
        );
        let g = grade(
            &q,
            &Answer::Choices {
                selected: vec![0, 1],
            },
        );
        assert!(!g.correct);
        assert_eq!(g.marks, vec![Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn text_trims_input() {
        let q = question(
            QuestionKind::FillBlank,
            &[],
            AnswerKey::Text {
                accepted: vec!["let".into()],
                case_sensitive: true,
            },
        );
        let g = grade(
            &q,
            &Answer::Text {
                input: "  let  ".into(),
            },
        );
        assert!(g.correct);
    }

    #[test]
    fn text_case_insensitive_fold() {
        let q = question(
            QuestionKind::FillBlank,
            &[],
            AnswerKey::Text {
                accepted: vec!["Paris".into()],
                case_sensitive: false,
            },
        );
        assert!(grade(&q, &Answer::Text { input: "paris".into() }).correct);
        assert!(grade(&q, &Answer::Text { input: "PARIS".into() }).correct);
        assert!(!grade(&q, &Answer::Text { input: "pariss".into() }).correct);
    }

    #[test]
    fn text_case_sensitive_exact() {
        let q = question(
            QuestionKind::CodeCompletion,
            &[],
            AnswerKey::Text {
                accepted: vec!["Vec::new".into(), "Vec::default".into()],
                case_sensitive: true,
            },
        );
        assert!(grade(&q, &Answer::Text { input: "Vec::default".into() }).correct);
        assert!(!grade(&q, &Answer::Text { input: "vec::new".into() }).correct);
    }

    #[test]
    fn flashcard_uses_self_assessment() {
        let q = question(QuestionKind::Flashcard, &[], AnswerKey::SelfAssessed);
        assert!(grade(&q, &Answer::SelfAssessment { correct: true }).correct);
        assert!(!grade(&q, &Answer::SelfAssessment { correct: false }).correct);
    }

    #[test]
    fn ordering_exact_permutation() {
        let q = question(
            QuestionKind::DragDrop,
            &["first", "second", "third"],
            AnswerKey::Ordering {
                order: vec![1, 2, 3],
            },
        );
        let g = grade(
            &q,
            &Answer::Ordering {
                order: vec![1, 2, 3],
            },
        );
        assert!(g.correct);
        assert_eq!(g.marks, vec![Some(true), Some(true), Some(true)]);
    }

    #[test]
    fn ordering_reversed_marks_per_slot() {
        let q = question(
            QuestionKind::DragDrop,
            &["first", "second", "third"],
            AnswerKey::Ordering {
                order: vec![1, 2, 3],
            },
        );
        let g = grade(
            &q,
            &Answer::Ordering {
                order: vec![3, 2, 1],
            },
        );
        assert!(!g.correct);
        assert_eq!(g.marks, vec![Some(false), Some(true), Some(false)]);
    }

    #[test]
    fn ordering_length_mismatch_is_incorrect() {
        let q = question(
            QuestionKind::DragDrop,
            &["first", "second", "third"],
            AnswerKey::Ordering {
                order: vec![1, 2, 3],
            },
        );
        let g = grade(&q, &Answer::Ordering { order: vec![1, 2] });
        assert!(!g.correct);
        assert_eq!(g.marks, vec![Some(true), Some(true), None]);
    }

    #[test]
    fn mismatched_answer_shape_grades_incorrect() {
        let q = question(
            QuestionKind::Mcq,
            &["a", "b"],
            AnswerKey::Choice { index: 0 },
        );
        let g = grade(&q, &Answer::Text { input: "a".into() });
        assert!(!g.correct);
        assert!(g.marks.is_empty());
    }
}
