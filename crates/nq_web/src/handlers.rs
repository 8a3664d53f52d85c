use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    question: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    let question = request.question.trim();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing question in request body",
                "example": { "question": "latest tech news" }
            })),
        );
    }

    info!("📥 Received: {}", question);
    match state.assistant.answer_question(question).await {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
            }
        },
        Err(e) => {
            error!("❌ Error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "News assistant API is running",
        "services": {
            "llm": "ready",
            "ranking": "ready",
            "news_api": "ready"
        }
    }))
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the news assistant API",
        "endpoints": {
            "/chat": {
                "method": "POST",
                "description": "Send a question to the assistant",
                "body": { "question": "your question here" },
                "example": { "question": "latest tech news" }
            },
            "/health": {
                "method": "GET",
                "description": "Check API health status"
            }
        }
    }))
}
