use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures that escape the audit flow. All of them surface as HTTP 500.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        error!(error = %self, "audit request failed");
        let body = Json(json!({
            "status": "error",
            "message": "Internal Server Error",
            "debug": self.to_string(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Used by the panic-catching layer so a panic still answers in the error shape.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AuditError::Panicked(detail).into_response()
}
