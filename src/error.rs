use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::session::SessionPhase;

/// Failure to obtain a usable question set from the generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Generator returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed generator payload: {0}")]
    Malformed(String),
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("No questions generated")]
    EmptyResult,
    #[error("Mock error: {0}")]
    Mock(String),
}

/// User-correctable input problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a quiz topic")]
    EmptyTopic,
    #[error("Please answer all questions before submitting ({answered} of {total} answered)")]
    IncompleteAnswers { answered: usize, total: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Question {index} does not exist (set has {total} questions)")]
    UnknownQuestion { index: usize, total: usize },
    #[error("Question {index} has no option '{key}'")]
    UnknownOption { index: usize, key: String },
    #[error("Answers are frozen after submission")]
    Frozen,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Question generation failed: {0}")]
    Generation(#[from] GenerationFailure),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: SessionPhase,
    },
}

impl SessionError {
    /// Machine-readable code for the presentation layer.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Validation(ValidationError::EmptyTopic) => "EMPTY_TOPIC",
            SessionError::Validation(ValidationError::IncompleteAnswers { .. }) => "INCOMPLETE_ANSWERS",
            SessionError::Generation(GenerationFailure::EmptyResult) => "NO_QUESTIONS",
            SessionError::Generation(_) => "GENERATION_FAILED",
            SessionError::Selection(_) => "INVALID_SELECTION",
            SessionError::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

/// Serializable form of the last error, exposed in session snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub code: &'static str,
    pub message: String,
}

impl From<&SessionError> for ErrorView {
    fn from(err: &SessionError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
