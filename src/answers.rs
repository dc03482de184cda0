use crate::error::SelectionError;
use crate::model::{AnswerMap, QuestionSet};

/// Records the user's selection for each question.
///
/// Keys only enter through `select`, which checks them against the question
/// set, so the map never holds an index or option the set doesn't have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerTracker {
    answers: AnswerMap,
    frozen: bool,
}

impl AnswerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `key` for question `index`, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Rejects unknown questions or options, and any selection once frozen.
    /// A rejected call leaves the map untouched.
    pub fn select(&mut self, questions: &QuestionSet, index: usize, key: &str) -> Result<&AnswerMap, SelectionError> {
        if self.frozen {
            return Err(SelectionError::Frozen);
        }
        let question = questions.get(index).ok_or(SelectionError::UnknownQuestion {
            index,
            total: questions.len(),
        })?;
        if !question.has_option(key) {
            return Err(SelectionError::UnknownOption {
                index,
                key: key.to_string(),
            });
        }
        self.answers.insert(index, key.to_string());
        Ok(&self.answers)
    }

    /// True once every question in `questions` has a selection.
    pub fn is_complete(&self, questions: &QuestionSet) -> bool {
        self.answers.len() == questions.len()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn selected(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}
