use axum::Json;
use serde_json::json;
use tracing::info;

use crate::models::GcsFileTestRequest;
use crate::services::ProcessError;

/// POST /gcs-file-test
///
/// Debug endpoint: validates and echoes the two request fields without
/// touching storage or Document AI.
pub async fn gcs_file_test(
    Json(payload): Json<GcsFileTestRequest>,
) -> Result<Json<serde_json::Value>, ProcessError> {
    let bucket_name = match payload.bucket_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ProcessError::MissingField("bucket_name")),
    };
    let file_name = match payload.file_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ProcessError::MissingField("file_name")),
    };

    info!(bucket = %bucket_name, file = %file_name, "gcs-file-test parameters received");

    Ok(Json(json!({
        "status": "success",
        "message": "Parameters received successfully.",
        "received_bucket": bucket_name,
        "received_file": file_name,
    })))
}
