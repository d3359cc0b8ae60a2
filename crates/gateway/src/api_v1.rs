//! HTTP API v1.
//!
//! Endpoints:
//!
//! - `POST   /v1/agent/execute`  Route a task through the agents
//! - `GET    /v1/sessions/{session_id}/memory`  Long-term log of a session
//! - `DELETE /v1/sessions/{session_id}/memory`  Forget a session's short-term memory

use axum::{
    Router,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use agentdesk_core::task::{ExecutionResult, Task};

use crate::SharedState;
use crate::error::ApiError;

const MAX_SESSION_ID_CHARS: usize = 100;
const MAX_TASK_CHARS: usize = 5000;

/// Build the v1 API router. Nest this under "/v1" in the main router.
pub fn v1_router(state: SharedState) -> Router {
    Router::new()
        .route("/agent/execute", post(execute_handler))
        .route(
            "/sessions/{session_id}/memory",
            get(session_memory_handler).delete(clear_session_memory_handler),
        )
        .with_state(state)
}

// ── Execute ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub session_id: String,
    pub task: String,
}

impl ExecuteRequest {
    fn validate(&self) -> Result<(), ApiError> {
        check_length("session_id", &self.session_id, MAX_SESSION_ID_CHARS)?;
        check_length("task", &self.task, MAX_TASK_CHARS)
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(ApiError::validation(
            field,
            format!("must be between 1 and {max} characters"),
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub result: ExecutionResult,
}

async fn execute_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    info!(session_id = %req.session_id, "Executing task");
    let task = Task::new(req.session_id, req.task);
    let result = state.router.run(&task).await;

    Ok(Json(ExecuteResponse { result }))
}

// ── Session memory ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MemoryEntryDto {
    id: String,
    message: String,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct SessionMemoryResponse {
    session_id: String,
    backend: String,
    entries: Vec<MemoryEntryDto>,
}

async fn session_memory_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionMemoryResponse>, ApiError> {
    check_length("session_id", &session_id, MAX_SESSION_ID_CHARS)?;

    let memory = state.router.memory();
    let entries = memory
        .history(&session_id)
        .await?
        .into_iter()
        .map(|r| MemoryEntryDto {
            id: r.id,
            message: r.message,
            created_at: r.created_at.to_rfc3339(),
        })
        .collect();

    Ok(Json(SessionMemoryResponse {
        session_id,
        backend: memory.backend_name().to_string(),
        entries,
    }))
}

#[derive(Debug, Serialize)]
struct ClearMemoryResponse {
    session_id: String,
    cleared: usize,
}

async fn clear_session_memory_handler(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearMemoryResponse>, ApiError> {
    check_length("session_id", &session_id, MAX_SESSION_ID_CHARS)?;

    let cleared = state.router.memory().clear(&session_id).await?;
    info!(session_id = %session_id, cleared, "Cleared short-term memory");

    Ok(Json(ClearMemoryResponse {
        session_id,
        cleared,
    }))
}
