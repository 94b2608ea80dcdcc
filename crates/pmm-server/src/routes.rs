use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Json};
use axum::routing::{delete, get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::StreamExt;

use pmm_core::error::GatewayError;
use pmm_core::types::ToolCall;

use crate::state::AppState;

type ErrorBody = (StatusCode, Json<serde_json::Value>);

fn error_response(err: GatewayError) -> ErrorBody {
    let status = match &err {
        GatewayError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::ModelUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

// ── Health ──────────────────────────────────────────────────────────────

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "agent": "pmm-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ── Chat ────────────────────────────────────────────────────────────────

pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/stream", post(chat_stream))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    session_id: String,
    response: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ToolCall>,
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ErrorBody> {
    let outcome = state
        .orchestrator
        .run_turn(req.session_id.as_deref(), &req.message)
        .await
        .map_err(error_response)?;

    Ok(Json(ChatResponse {
        session_id: outcome.session_id,
        response: outcome.response,
        tool_calls: outcome.tool_calls,
    }))
}

async fn chat_stream(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, ErrorBody> {
    let rx = state
        .orchestrator
        .stream_turn(req.session_id.as_deref(), &req.message)
        .await
        .map_err(error_response)?;

    let stream =
        UnboundedReceiverStream::new(rx).map(|event| Event::default().json_data(&event));

    Ok(Sse::new(stream))
}

// ── Sessions ────────────────────────────────────────────────────────────

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/sessions/{id}", delete(delete_session))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ErrorBody> {
    let deleted = state.store.delete(&id).map_err(error_response)?;
    if deleted {
        Ok(Json(serde_json::json!({ "status": "deleted" })))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Session not found" })),
        ))
    }
}
