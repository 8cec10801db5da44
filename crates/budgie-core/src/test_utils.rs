//! Test utilities for budgie-core
//!
//! This module provides testing infrastructure including a mock model server
//! that speaks both the Ollama and the OpenAI-compatible APIs, and serves a
//! small model file for download tests.

use axum::{
    extract::{Json, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Prompts containing this marker make the generate endpoints return 500
pub const FAIL_MARKER: &str = "FAIL_GENERATION";

/// Prompts containing this marker get an empty (whitespace-only) completion
pub const EMPTY_MARKER: &str = "EMPTY_GENERATION";

/// Prompts containing this marker stall the generate endpoints for a few seconds
pub const SLOW_MARKER: &str = "SLOW_GENERATION";

/// Body served for `/models/{file}` downloads
pub const MODEL_FILE_BYTES: &[u8] = b"GGUF mock model weights for budgie tests\n";

/// Mock model server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate))
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat_completions))
            .route("/models/:file", get(handle_model_file));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL of the downloadable mock model file
    pub fn model_url(&self) -> String {
        format!("{}/models/orca-mini-3b-gguf2-q4_0.gguf", self.url())
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Canned advice keyed on the user's question
fn mock_reply(prompt: &str) -> String {
    let question = prompt
        .rsplit("User: ")
        .next()
        .unwrap_or(prompt)
        .to_lowercase();

    if question.contains("invest") {
        "  Consider low-cost index funds and invest consistently every month.  ".to_string()
    } else {
        "  Start by tracking your expenses and set aside savings first.  ".to_string()
    }
}

async fn stall_if_slow(prompt: &str) {
    if prompt.contains(SLOW_MARKER) {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    }
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "orca-mini:3b".to_string(),
            size: 1_930_000_000,
        }],
    })
}

/// Ollama generate endpoint
async fn handle_generate(Json(request): Json<GenerateRequest>) -> impl IntoResponse {
    if request.prompt.contains(FAIL_MARKER) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
    }
    stall_if_slow(&request.prompt).await;

    let response = if request.prompt.contains(EMPTY_MARKER) {
        "   ".to_string()
    } else {
        mock_reply(&request.prompt)
    };

    Json(GenerateResponse {
        model: request.model,
        response,
        done: true,
    })
    .into_response()
}

/// OpenAI-compatible model listing (health check)
async fn handle_models() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "object": "list",
        "data": [{"id": "orca-mini-3b", "object": "model"}]
    }))
}

/// OpenAI-compatible chat completions endpoint
async fn handle_chat_completions(Json(request): Json<ChatRequest>) -> impl IntoResponse {
    let prompt = request
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();

    if prompt.contains(FAIL_MARKER) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response();
    }
    stall_if_slow(&prompt).await;

    let content = if prompt.contains(EMPTY_MARKER) {
        String::new()
    } else {
        mock_reply(&prompt)
    };

    Json(serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

/// Model file download; any name ending in `.gguf` is served
async fn handle_model_file(Path(file): Path<String>) -> impl IntoResponse {
    if file.ends_with(".gguf") {
        (StatusCode::OK, MODEL_FILE_BYTES.to_vec()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

#[derive(Debug, Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
    size: u64,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
