use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::models::{GenerateResponse, McqPayload};
use super::QuestionGenerator;
use crate::error::GenerationFailure;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Questions(GenerateResponse),
    Failure(GenerationFailure),
    /// Wait before producing the inner reply
    Delayed(Duration, Box<MockResponse>),
}

impl MockResponse {
    pub fn questions(mcqs: Vec<McqPayload>) -> Self {
        Self::Questions(GenerateResponse { mcqs })
    }

    pub fn delayed(delay: Duration, inner: MockResponse) -> Self {
        Self::Delayed(delay, Box::new(inner))
    }
}

/// Shared control surface of a `MockGenerator`.
#[derive(Debug, Default)]
pub struct MockHandle {
    responses: Mutex<VecDeque<MockResponse>>,
    fallback: Mutex<Option<GenerateResponse>>,
    topics: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHandle {
    pub fn push(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Reply used once the script runs out. Without one, an empty set is returned.
    pub fn set_fallback(&self, response: GenerateResponse) {
        *lock(&self.fallback) = Some(response);
    }

    /// Topics requested so far, in order.
    pub fn topics(&self) -> Vec<String> {
        lock(&self.topics).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.topics).len()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }

    fn next_response(&self, topic: &str) -> MockResponse {
        lock(&self.topics).push(topic.to_string());
        if let Some(response) = lock(&self.responses).pop_front() {
            return response;
        }
        MockResponse::Questions(lock(&self.fallback).clone().unwrap_or_default())
    }
}

/// Scripted generator for tests and offline demos.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    handle: Arc<MockHandle>,
}

impl MockGenerator {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (mock, handle) = Self::new();
        for response in responses {
            handle.push(response);
        }
        (mock, handle)
    }
}

#[async_trait]
impl QuestionGenerator for MockGenerator {
    async fn generate(&self, topic: &str) -> Result<GenerateResponse, GenerationFailure> {
        let mut next = self.handle.next_response(topic);
        loop {
            match next {
                MockResponse::Questions(response) => {
                    debug!(topic, count = response.mcqs.len(), "Mock generator replying");
                    return Ok(response);
                }
                MockResponse::Failure(err) => return Err(err),
                MockResponse::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    next = *inner;
                }
            }
        }
    }

    fn clone_box(&self) -> Box<dyn QuestionGenerator> {
        Box::new(self.clone())
    }
}

/// Small fixed quiz served by the handle-less mock.
pub fn sample_response() -> GenerateResponse {
    GenerateResponse {
        mcqs: vec![
            McqPayload::new("2+2?", [("A", "3"), ("B", "4")], &["B"]),
            McqPayload::new(
                "Which keyword declares an immutable binding in Rust?",
                [("A", "let"), ("B", "var"), ("C", "const mut"), ("D", "def")],
                &["A"],
            ),
            McqPayload::new(
                "Which HTTP method does the generator expect?",
                [("A", "GET"), ("B", "POST"), ("C", "PUT")],
                &["B"],
            ),
        ],
    }
}
