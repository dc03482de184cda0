//! Single-shot retrieval of a question set for a topic.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::config::{GeneratorConfig, DEFAULT_TIMEOUT};
use crate::error::GenerationFailure;
use crate::generators::{HttpGenerator, QuestionGenerator};
use crate::model::QuestionSet;

/// Wraps a generator with a bounded timeout and converts its payload into a
/// `QuestionSet`. No retries: a failure is reported once to the caller.
#[derive(Debug, Clone)]
pub struct QuestionSetFetcher {
    generator: Box<dyn QuestionGenerator>,
    timeout: Duration,
}

impl QuestionSetFetcher {
    pub fn new(generator: Box<dyn QuestionGenerator>) -> Self {
        Self {
            generator,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// HTTP fetcher using the endpoint and timeout from `config`.
    pub fn from_config(config: GeneratorConfig) -> Self {
        let timeout = config.timeout;
        Self::new(Box::new(HttpGenerator::new(config))).with_timeout(timeout)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Request questions for `topic`, which the caller has already trimmed and
    /// checked for emptiness. An empty set is returned as-is.
    #[instrument(target = "mcq_session::fetcher", skip(self), fields(timeout = ?self.timeout))]
    pub async fn fetch(&self, topic: &str) -> Result<QuestionSet, GenerationFailure> {
        let response = match tokio::time::timeout(self.timeout, self.generator.generate(topic)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Question generation timed out");
                return Err(GenerationFailure::Timeout(self.timeout));
            }
        };

        let set = QuestionSet::from_payloads(response.mcqs);
        info!(question_count = set.len(), "Fetched question set");
        Ok(set)
    }
}
