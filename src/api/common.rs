//! Error wire format shared by the API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::ProcessError;

/// Body of every non-success response:
/// `{"status": "error", "stage": ..., "detail": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: String,
    pub stage: String,
    pub detail: String,
}

impl ErrorBody {
    pub fn new(stage: &str, detail: String) -> Self {
        Self {
            status: "error".to_string(),
            stage: stage.to_string(),
            detail,
        }
    }
}

impl IntoResponse for ProcessError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProcessError::MissingField(_) | ProcessError::InvalidFileData(_) => {
                StatusCode::BAD_REQUEST
            }
            ProcessError::SourceNotFound { .. } => StatusCode::NOT_FOUND,
            ProcessError::Fetch(_) | ProcessError::Extract(_) | ProcessError::Persist(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody::new(self.stage(), self.to_string());
        (status, Json(body)).into_response()
    }
}
