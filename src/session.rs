//! Quiz session state machine.
//!
//! `SessionController` is the only way to mutate a session:
//!
//! ```text
//! Idle/AwaitingTopic --submit_topic--> Loading --complete_fetch--> Answering --submit--> Submitted
//!                                          |                                              |
//!                                          +--> AwaitingTopic (failure) / Failed (empty)  |
//! any state ------------------------------------ reset -----------------------------------+--> AwaitingTopic
//! ```
//!
//! Fetching is split in two so the network call never borrows the session:
//! `submit_topic` hands out a `FetchRequest` tagged with a `SessionToken`, and
//! `complete_fetch` only accepts an outcome whose token matches the session's
//! current `Loading` state. `reset` and every new topic advance the token, so a
//! late response from an abandoned request is dropped.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::answers::AnswerTracker;
use crate::error::{ErrorView, GenerationFailure, SessionError, ValidationError};
use crate::fetcher::QuestionSetFetcher;
use crate::model::{AnswerMap, QuestionSet};
use crate::scoring::{self, ResultSummary};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    AwaitingTopic,
    Loading,
    Answering,
    Submitted,
    Failed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::AwaitingTopic => write!(f, "awaiting a topic"),
            SessionPhase::Loading => write!(f, "loading questions"),
            SessionPhase::Answering => write!(f, "answering"),
            SessionPhase::Submitted => write!(f, "submitted"),
            SessionPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Generation counter value identifying one topic submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(u64);

impl SessionToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// An outbound fetch, detached from the session so it can be awaited or spawned.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    token: SessionToken,
    topic: String,
    fetcher: QuestionSetFetcher,
}

impl FetchRequest {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Perform the request. Feed the outcome back through `complete_fetch`.
    pub async fn run(self) -> FetchOutcome {
        let result = self.fetcher.fetch(&self.topic).await;
        FetchOutcome {
            token: self.token,
            result,
        }
    }
}

/// Result of a `FetchRequest`, still tagged with its token.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    token: SessionToken,
    result: Result<QuestionSet, GenerationFailure>,
}

impl FetchOutcome {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn result(&self) -> &Result<QuestionSet, GenerationFailure> {
        &self.result
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Applied,
    /// The session moved on; the outcome was discarded.
    Stale,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    AwaitingTopic,
    Loading {
        token: SessionToken,
        topic: String,
    },
    Answering {
        topic: String,
        questions: QuestionSet,
        tracker: AnswerTracker,
    },
    Submitted {
        topic: String,
        questions: QuestionSet,
        tracker: AnswerTracker,
        summary: ResultSummary,
        submitted_at: DateTime<Utc>,
    },
    Failed {
        topic: String,
    },
}

impl State {
    fn phase(&self) -> SessionPhase {
        match self {
            State::Idle => SessionPhase::Idle,
            State::AwaitingTopic => SessionPhase::AwaitingTopic,
            State::Loading { .. } => SessionPhase::Loading,
            State::Answering { .. } => SessionPhase::Answering,
            State::Submitted { .. } => SessionPhase::Submitted,
            State::Failed { .. } => SessionPhase::Failed,
        }
    }
}

/// Owns one quiz session and every transition of it.
#[derive(Debug)]
pub struct SessionController {
    fetcher: QuestionSetFetcher,
    state: State,
    generation: u64,
    last_error: Option<SessionError>,
}

impl SessionController {
    pub fn new(fetcher: QuestionSetFetcher) -> Self {
        Self {
            fetcher,
            state: State::Idle,
            generation: 0,
            last_error: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn topic(&self) -> Option<&str> {
        match &self.state {
            State::Loading { topic, .. }
            | State::Answering { topic, .. }
            | State::Submitted { topic, .. }
            | State::Failed { topic } => Some(topic),
            State::Idle | State::AwaitingTopic => None,
        }
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        match &self.state {
            State::Answering { questions, .. } | State::Submitted { questions, .. } => Some(questions),
            _ => None,
        }
    }

    fn tracker(&self) -> Option<&AnswerTracker> {
        match &self.state {
            State::Answering { tracker, .. } | State::Submitted { tracker, .. } => Some(tracker),
            _ => None,
        }
    }

    pub fn answers(&self) -> Option<&AnswerMap> {
        self.tracker().map(AnswerTracker::answers)
    }

    /// Whether every loaded question has a selection. False before loading.
    pub fn is_complete(&self) -> bool {
        match &self.state {
            State::Answering { questions, tracker, .. } | State::Submitted { questions, tracker, .. } => {
                !questions.is_empty() && tracker.is_complete(questions)
            }
            _ => false,
        }
    }

    pub fn summary(&self) -> Option<&ResultSummary> {
        match &self.state {
            State::Submitted { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            State::Submitted { submitted_at, .. } => Some(*submitted_at),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Token of the fetch currently in flight, if any.
    pub fn pending_token(&self) -> Option<SessionToken> {
        match &self.state {
            State::Loading { token, .. } => Some(*token),
            _ => None,
        }
    }

    fn reject(&mut self, err: SessionError) -> SessionError {
        warn!(phase = %self.phase(), error = %err, "Session action rejected");
        self.last_error = Some(err.clone());
        err
    }

    fn invalid(&mut self, action: &'static str) -> SessionError {
        let phase = self.phase();
        self.reject(SessionError::InvalidTransition { action, phase })
    }

    /// Start loading questions for `topic`.
    ///
    /// Allowed before any quiz, after a reset or failure, and after a
    /// submission (the previous results are discarded). Rejected while a
    /// fetch is in flight or a quiz is being answered.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyTopic` for a blank topic, `InvalidTransition`
    /// otherwise. Neither changes the state.
    pub fn submit_topic(&mut self, topic: &str) -> Result<FetchRequest, SessionError> {
        if matches!(self.phase(), SessionPhase::Loading | SessionPhase::Answering) {
            return Err(self.invalid("submit a topic"));
        }

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(self.reject(ValidationError::EmptyTopic.into()));
        }

        self.generation += 1;
        let token = SessionToken(self.generation);
        self.state = State::Loading {
            token,
            topic: topic.to_string(),
        };
        self.last_error = None;
        info!(topic, token = token.value(), "Loading questions");

        Ok(FetchRequest {
            token,
            topic: topic.to_string(),
            fetcher: self.fetcher.clone(),
        })
    }

    /// Apply a finished fetch.
    ///
    /// Outcomes whose token doesn't match the current `Loading` state are
    /// dropped and reported as `Stale` without touching the session.
    ///
    /// # Errors
    ///
    /// Returns the generation failure when the applied outcome failed or held
    /// no questions.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> Result<FetchApplied, SessionError> {
        let topic = match &self.state {
            State::Loading { token, topic } if *token == outcome.token => topic.clone(),
            _ => {
                warn!(
                    token = outcome.token.value(),
                    current = ?self.pending_token().map(SessionToken::value),
                    "Discarding stale fetch response"
                );
                return Ok(FetchApplied::Stale);
            }
        };

        match outcome.result {
            Ok(questions) if questions.is_empty() => {
                self.state = State::Failed { topic };
                Err(self.reject(GenerationFailure::EmptyResult.into()))
            }
            Ok(questions) => {
                info!(topic = %topic, question_count = questions.len(), "Questions loaded");
                self.state = State::Answering {
                    topic,
                    questions,
                    tracker: AnswerTracker::new(),
                };
                self.last_error = None;
                Ok(FetchApplied::Applied)
            }
            Err(failure) => {
                self.state = State::AwaitingTopic;
                Err(self.reject(failure.into()))
            }
        }
    }

    /// Submit `topic` and wait for its questions in one step.
    ///
    /// # Errors
    ///
    /// Any error from `submit_topic` or `complete_fetch`.
    #[instrument(target = "mcq_session::session", skip(self))]
    pub async fn load_topic(&mut self, topic: &str) -> Result<FetchApplied, SessionError> {
        let request = self.submit_topic(topic)?;
        let outcome = request.run().await;
        self.complete_fetch(outcome)
    }

    /// Record `key` for question `index`. Returns whether the quiz is now complete.
    ///
    /// # Errors
    ///
    /// `SelectionError` for unknown questions/options or after submission,
    /// `InvalidTransition` when no quiz is loaded.
    pub fn select_answer(&mut self, index: usize, key: &str) -> Result<bool, SessionError> {
        let result = match &mut self.state {
            State::Answering { questions, tracker, .. } | State::Submitted { questions, tracker, .. } => {
                let selected = tracker.select(questions, index, key).map(|_| ());
                selected.map(|()| tracker.is_complete(questions))
            }
            _ => return Err(self.invalid("select an answer")),
        };

        match result {
            Ok(complete) => {
                self.last_error = None;
                Ok(complete)
            }
            Err(err) => Err(self.reject(err.into())),
        }
    }

    /// Score the answers and freeze them. Scoring runs once; the summary is
    /// kept until the next reset or topic.
    ///
    /// # Errors
    ///
    /// `ValidationError::IncompleteAnswers` when a question is unanswered; the
    /// session stays in `Answering` and nothing is scored.
    pub fn submit(&mut self) -> Result<ResultSummary, SessionError> {
        let (answered, total) = match &self.state {
            State::Answering { questions, tracker, .. } => (tracker.answered(), questions.len()),
            _ => return Err(self.invalid("submit answers")),
        };
        if total == 0 {
            return Err(self.reject(GenerationFailure::EmptyResult.into()));
        }
        if answered != total {
            return Err(self.reject(ValidationError::IncompleteAnswers { answered, total }.into()));
        }

        let (topic, questions, mut tracker) = match std::mem::take(&mut self.state) {
            State::Answering {
                topic,
                questions,
                tracker,
            } => (topic, questions, tracker),
            other => {
                self.state = other;
                return Err(self.invalid("submit answers"));
            }
        };

        let summary = scoring::score(&questions, tracker.answers());
        tracker.freeze();
        info!(
            topic = %topic,
            correct = summary.correct,
            total = summary.total,
            percentage = summary.percentage,
            "Quiz submitted"
        );
        self.state = State::Submitted {
            topic,
            questions,
            tracker,
            summary: summary.clone(),
            submitted_at: Utc::now(),
        };
        self.last_error = None;
        Ok(summary)
    }

    /// Discard everything and wait for a new topic. Any fetch in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        info!(from = %self.phase(), "Session reset");
        self.state = State::AwaitingTopic;
        self.last_error = None;
    }

    /// Read-only snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        let summary = self.summary();
        let tracker = self.tracker();
        let questions = self
            .questions()
            .map(|set| {
                set.iter()
                    .map(|question| QuestionView {
                        index: question.id,
                        prompt: question.prompt.clone(),
                        options: question.options.clone(),
                        selected: tracker.and_then(|t| t.selected(question.id)).map(str::to_string),
                        correct: summary.and_then(|s| s.is_correct(question.id)),
                        correct_key: summary
                            .and_then(|_| question.correct_key())
                            .map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();

        SessionView {
            phase: self.phase(),
            topic: self.topic().map(str::to_string),
            total: self.questions().map_or(0, QuestionSet::len),
            answered: tracker.map_or(0, AnswerTracker::answered),
            complete: self.is_complete(),
            questions,
            summary: summary.cloned(),
            submitted_at: self.submitted_at(),
            last_error: self.last_error.as_ref().map(ErrorView::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub prompt: String,
    pub options: IndexMap<String, String>,
    pub selected: Option<String>,
    /// Set once submitted
    pub correct: Option<bool>,
    /// Revealed once submitted
    pub correct_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub topic: Option<String>,
    pub total: usize,
    pub answered: usize,
    pub complete: bool,
    pub questions: Vec<QuestionView>,
    pub summary: Option<ResultSummary>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub last_error: Option<ErrorView>,
}
