#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use mcq_session::generators::{McqPayload, MockGenerator, MockHandle, MockResponse};
use mcq_session::{QuestionSet, QuestionSetFetcher, SessionController};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub fn arithmetic_question() -> McqPayload {
    McqPayload::new("2+2?", [("A", "3"), ("B", "4")], &["B"])
}

pub fn capital_question() -> McqPayload {
    McqPayload::new(
        "What is the capital of France?",
        [("A", "Paris"), ("B", "Rome"), ("C", "Berlin")],
        &["A"],
    )
}

pub fn planet_question() -> McqPayload {
    McqPayload::new(
        "Which planet is closest to the sun?",
        [("A", "Venus"), ("B", "Mercury"), ("C", "Mars"), ("D", "Earth")],
        &["B"],
    )
}

pub fn question_set(payloads: Vec<McqPayload>) -> QuestionSet {
    QuestionSet::from_payloads(payloads)
}

/// Session backed by a scripted mock generator.
pub fn mock_session(responses: Vec<MockResponse>) -> (SessionController, Arc<MockHandle>) {
    mock_session_with_timeout(responses, Duration::from_secs(5))
}

pub fn mock_session_with_timeout(responses: Vec<MockResponse>, timeout: Duration) -> (SessionController, Arc<MockHandle>) {
    let (mock, handle) = MockGenerator::with_responses(responses);
    let fetcher = QuestionSetFetcher::new(Box::new(mock)).with_timeout(timeout);
    (SessionController::new(fetcher), handle)
}

/// Serve one HTTP response on a local port. The join handle yields the raw request.
pub async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept connection");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write response");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}/generate", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}
