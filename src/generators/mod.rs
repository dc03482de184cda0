//! Clients for the remote question generator.
//!
//! Implementors provide `generate`, which sends one topic and returns the raw
//! payload. Turning that payload into a session's question set is done by
//! `QuestionSetFetcher`.

use std::fmt::{self, Debug};

use async_trait::async_trait;

use crate::config::GeneratorConfig;
use crate::error::GenerationFailure;

pub mod http;
pub mod mock;
pub mod models;

pub use http::HttpGenerator;
pub use mock::{MockGenerator, MockHandle, MockResponse};
pub use models::{GenerateRequest, GenerateResponse, McqPayload};

#[async_trait]
pub trait QuestionGenerator: Send + Sync + Debug {
    /// Perform exactly one request for `topic`.
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, GenerationFailure>;

    /// Clone this generator into a boxed trait object
    fn clone_box(&self) -> Box<dyn QuestionGenerator>;
}

impl Clone for Box<dyn QuestionGenerator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl QuestionGenerator for Box<dyn QuestionGenerator> {
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, GenerationFailure> {
        self.as_ref().generate(topic).await
    }

    fn clone_box(&self) -> Box<dyn QuestionGenerator> {
        self.as_ref().clone_box()
    }
}

/// Generator backend selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorKind {
    #[default]
    Http,
    Mock,
}

impl GeneratorKind {
    /// Parse generator kind from string (case insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown generator: '{}'. Supported: http, mock", s)),
        }
    }

    /// Build the generator. The mock variant has no handle and answers every
    /// topic with `mock::sample_response`.
    pub fn build(self, config: &GeneratorConfig) -> Box<dyn QuestionGenerator> {
        match self {
            GeneratorKind::Http => Box::new(HttpGenerator::new(config.clone())),
            GeneratorKind::Mock => {
                let (mock, handle) = MockGenerator::new();
                handle.set_fallback(mock::sample_response());
                Box::new(mock)
            }
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::Http => write!(f, "http"),
            GeneratorKind::Mock => write!(f, "mock"),
        }
    }
}
