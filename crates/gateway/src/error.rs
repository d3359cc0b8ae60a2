//! Error responses.
//!
//! Every failure leaves the gateway as the same JSON envelope:
//!
//! ```json
//! {"status": "failed", "error_code": "validation_error",
//!  "error_message": "...", "details": {"field": "...", "constraint": "..."},
//!  "timestamp": "..."}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error_code: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: String,
}

/// Failures surfaced by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{field}: {constraint}")]
    Validation { field: String, constraint: String },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        let (error_code, details) = match self {
            Self::Validation { field, constraint } => (
                "validation_error",
                Some(serde_json::json!({ "field": field, "constraint": constraint })),
            ),
            Self::Internal(_) => ("internal_error", None),
        };
        ErrorResponse {
            status: "failed".into(),
            error_code: error_code.into(),
            error_message: self.to_string(),
            details,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<agentdesk_core::MemoryError> for ApiError {
    fn from(e: agentdesk_core::MemoryError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation { .. } => warn!(error = %self, "Rejected request"),
            Self::Internal(_) => error!(error = %self, "Request failed"),
        }
        (status, Json(self.body())).into_response()
    }
}
