//! Session data: questions as the user sees them and the answers they pick.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::generators::models::McqPayload;

/// Selected option key per question index.
pub type AnswerMap = BTreeMap<usize, String>;

/// One multiple-choice question, indexed by its position in the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: usize,
    pub prompt: String,
    /// Option key -> option text, in generator order
    pub options: IndexMap<String, String>,
    /// Correct keys as delivered by the generator. Only the first one is scored.
    pub answer: Vec<String>,
}

impl Question {
    pub fn from_payload(id: usize, payload: McqPayload) -> Self {
        Self {
            id,
            prompt: payload.question,
            options: payload.options,
            answer: payload.answer,
        }
    }

    /// The key scoring compares against, if the generator supplied any.
    pub fn correct_key(&self) -> Option<&str> {
        self.answer.first().map(String::as_str)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }
}

/// Ordered, read-only questions for one session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn from_payloads(payloads: Vec<McqPayload>) -> Self {
        let questions = payloads
            .into_iter()
            .enumerate()
            .map(|(id, payload)| Question::from_payload(id, payload))
            .collect();
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
