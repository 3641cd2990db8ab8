use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

use crate::models::{ProcessInvoiceRequest, ProcessInvoiceResponse};
use crate::services::ProcessError;
use crate::state::AppState;

/// POST /process-invoice
///
/// Downloads the named PDF from GCS (or takes it inline from `file_data`),
/// runs it through the configured Document AI processor and persists the
/// resulting document JSON under the derived output name.
pub async fn process_invoice(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProcessInvoiceRequest>,
) -> Result<Json<ProcessInvoiceResponse>, ProcessError> {
    let outcome = state.pipeline.run(payload).await?;

    info!(
        file = %outcome.source_file,
        output = %outcome.output_location,
        "process-invoice request completed"
    );

    Ok(Json(ProcessInvoiceResponse::success(
        format!(
            "Processed {} and saved JSON to {}",
            outcome.source_file, outcome.output_location
        ),
        outcome.output_location,
    )))
}
