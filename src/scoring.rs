//! Pure scoring of a completed answer map.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{AnswerMap, QuestionSet};

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total: usize,
    pub correct: usize,
    /// correct / total * 100, rounded to one decimal place
    pub percentage: f64,
    /// Question index -> whether the selected key was correct
    pub per_question: BTreeMap<usize, bool>,
}

impl ResultSummary {
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        self.per_question.get(&index).copied()
    }

    /// Score label as shown to the user, e.g. `"66.7%"`.
    pub fn marks(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Round `correct / total` as a percentage with one decimal.
///
/// An empty set yields `0.0` rather than NaN. The session controller never
/// scores an empty set (it refuses to enter `Answering` without questions),
/// so this only guards direct callers.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 * 100.0 / total as f64;
    (raw * 10.0).round() / 10.0
}

/// Score `answers` against `questions`.
///
/// A question counts as correct only when its selection equals the first
/// entry of its correct-key list; further entries are ignored. Expects a
/// complete map: an unanswered question scores as wrong.
pub fn score(questions: &QuestionSet, answers: &AnswerMap) -> ResultSummary {
    let per_question: BTreeMap<usize, bool> = questions
        .iter()
        .map(|question| {
            let selected = answers.get(&question.id).map(String::as_str);
            let correct = matches!((selected, question.correct_key()), (Some(s), Some(c)) if s == c);
            (question.id, correct)
        })
        .collect();

    let total = questions.len();
    let correct = per_question.values().filter(|ok| **ok).count();

    ResultSummary {
        total,
        correct,
        percentage: percentage(correct, total),
        per_question,
    }
}
