use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use super::models::{GenerateRequest, GenerateResponse};
use super::QuestionGenerator;
use crate::config::GeneratorConfig;
use crate::error::GenerationFailure;
use crate::interceptors::Interceptor;

/// Generator reached over HTTP: `POST {"job": topic}` -> `{"mcqs": [...]}`.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    config: GeneratorConfig,
    client: Client,
    interceptor: Option<Arc<dyn Interceptor>>,
}

impl Default for HttpGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl HttpGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        info!(endpoint = %config.endpoint, "Creating new HTTP question generator");
        Self {
            config,
            client: Client::new(),
            interceptor: None,
        }
    }

    /// Record every successful raw response through `interceptor`.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

/// Decode a generator body. A missing or non-array `mcqs` is malformed.
pub fn parse_response(body: &str) -> Result<GenerateResponse, GenerationFailure> {
    serde_json::from_str(body).map_err(|e| GenerationFailure::Malformed(e.to_string()))
}

#[async_trait]
impl QuestionGenerator for HttpGenerator {
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, GenerationFailure> {
        let request = GenerateRequest {
            job: topic.to_string(),
        };

        debug!("Sending request to question generator");
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                GenerationFailure::Http(e.to_string())
            })?;

        let status = response.status();
        debug!(status = %status, "Received response from question generator");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %body, "Question generator error");
            return Err(GenerationFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read generator response body");
            GenerationFailure::Http(e.to_string())
        })?;

        if let Some(interceptor) = &self.interceptor {
            if let Err(e) = interceptor.save(topic, &body).await {
                warn!(error = %e, "Interceptor failed to record generator response");
            }
        }

        let parsed = parse_response(&body).map_err(|e| {
            error!(error = %e, "Failed to parse generator response JSON");
            e
        })?;

        info!(question_count = parsed.mcqs.len(), "Received generated questions");
        Ok(parsed)
    }

    fn clone_box(&self) -> Box<dyn QuestionGenerator> {
        Box::new(self.clone())
    }
}
