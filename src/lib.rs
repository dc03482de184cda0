pub mod answers;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod generators;
pub mod interceptors;
pub mod model;
pub mod scoring;
pub mod session;

// Convenient re-exports
pub use answers::AnswerTracker;
pub use error::{GenerationFailure, SelectionError, SessionError, ValidationError};
pub use fetcher::QuestionSetFetcher;
pub use model::{AnswerMap, Question, QuestionSet};
pub use scoring::{score, ResultSummary};
pub use session::{FetchApplied, FetchOutcome, FetchRequest, SessionController, SessionPhase, SessionToken, SessionView};
