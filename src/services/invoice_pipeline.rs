// ============================================================================
// INVOICE PROCESSING PIPELINE
// ============================================================================
//
// The single unit of work behind POST /process-invoice:
//
//   Validate -> Fetch -> Extract -> Persist
//
// Linear, request-scoped, no retries. Each stage is its own failure domain
// and tags the error it produces; the HTTP layer maps tags to status codes.
// Two behavior flags cover the handler variants that existed upstream:
// input = object reference | inline base64 bytes (per request), and
// destination = bucket | drive (per deployment, from config).
//
// ============================================================================

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::{error, info};

use crate::config::OutputDestination;
use crate::models::{output_object_name, ProcessInvoiceRequest};
use crate::services::docai_service::{DocAiError, DocumentAiService};
use crate::services::drive_service::{DriveError, DriveService};
use crate::services::gcs_service::{GcsService, StorageError};

const PDF_MIME_TYPE: &str = "application/pdf";
const JSON_MIME_TYPE: &str = "application/json";

/// Stage labels echoed to the caller. One canonical mapping; the upstream
/// variants that disagreed on tagging are not replicated.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("missing or empty field '{0}'")]
    MissingField(&'static str),

    #[error("'file_data' is not valid base64: {0}")]
    InvalidFileData(String),

    #[error("object '{object}' not found in bucket '{bucket}'")]
    SourceNotFound { bucket: String, object: String },

    #[error("failed to fetch source object: {0}")]
    Fetch(String),

    #[error("document extraction failed: {0}")]
    Extract(String),

    #[error("failed to persist result JSON: {0}")]
    Persist(String),
}

impl ProcessError {
    pub fn stage(&self) -> &'static str {
        match self {
            ProcessError::MissingField(_) | ProcessError::InvalidFileData(_) => "validation",
            ProcessError::SourceNotFound { .. } | ProcessError::Fetch(_) => "gcs-fetch",
            ProcessError::Extract(_) => "document-ai",
            ProcessError::Persist(_) => "upload",
        }
    }
}

impl From<StorageError> for ProcessError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { bucket, object } => {
                ProcessError::SourceNotFound { bucket, object }
            }
            other => ProcessError::Fetch(other.to_string()),
        }
    }
}

impl From<DocAiError> for ProcessError {
    fn from(err: DocAiError) -> Self {
        ProcessError::Extract(err.to_string())
    }
}

impl From<DriveError> for ProcessError {
    fn from(err: DriveError) -> Self {
        ProcessError::Persist(err.to_string())
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub source_file: String,
    pub output_location: String,
}

#[derive(Clone)]
pub struct InvoicePipeline {
    gcs: GcsService,
    docai: DocumentAiService,
    drive: DriveService,
    destination: OutputDestination,
}

impl InvoicePipeline {
    pub fn new(
        gcs: GcsService,
        docai: DocumentAiService,
        drive: DriveService,
        destination: OutputDestination,
    ) -> Self {
        Self {
            gcs,
            docai,
            drive,
            destination,
        }
    }

    /// Drives one request through all four stages.
    pub async fn run(&self, request: ProcessInvoiceRequest) -> Result<ProcessOutcome, ProcessError> {
        // ── Validate ────────────────────────────────────────────
        let (bucket_name, file_name, inline_bytes) = validate_request(&request)?;

        info!(
            bucket = %bucket_name,
            file = %file_name,
            inline = inline_bytes.is_some(),
            "Processing invoice"
        );

        // ── Fetch ───────────────────────────────────────────────
        let pdf_content = match inline_bytes {
            Some(bytes) => bytes,
            None => self
                .gcs
                .download_object(&bucket_name, &file_name)
                .await
                .map_err(|e| {
                    error!(bucket = %bucket_name, file = %file_name, error = %e, "GCS fetch failed");
                    ProcessError::from(e)
                })?
                .to_vec(),
        };

        // ── Extract ─────────────────────────────────────────────
        let document = self
            .docai
            .process_document(&pdf_content, PDF_MIME_TYPE)
            .await
            .map_err(|e| {
                error!(file = %file_name, error = %e, "Document AI extraction failed");
                ProcessError::from(e)
            })?;

        let document_json =
            serde_json::to_vec(&document).map_err(|e| ProcessError::Extract(e.to_string()))?;

        // ── Persist ─────────────────────────────────────────────
        let output_name = output_object_name(&file_name);
        let output_location = match self.destination {
            OutputDestination::Bucket => self
                .gcs
                .upload_object(&bucket_name, &output_name, document_json, JSON_MIME_TYPE)
                .await
                .map_err(|e| {
                    error!(file = %output_name, error = %e, "GCS upload failed");
                    ProcessError::Persist(e.to_string())
                })?,
            OutputDestination::Drive => self
                .drive
                .create_json_file(&output_name, document_json)
                .await
                .map_err(|e| {
                    error!(file = %output_name, error = %e, "Drive upload failed");
                    ProcessError::from(e)
                })?,
        };

        info!(
            file = %file_name,
            output = %output_location,
            "✅ Invoice processed"
        );

        Ok(ProcessOutcome {
            source_file: file_name,
            output_location,
        })
    }
}

/// Stage 1. Returns the validated fields plus decoded inline bytes, if any.
fn validate_request(
    request: &ProcessInvoiceRequest,
) -> Result<(String, String, Option<Vec<u8>>), ProcessError> {
    let bucket_name = match request.bucket_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ProcessError::MissingField("bucket_name")),
    };
    let file_name = match request.file_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ProcessError::MissingField("file_name")),
    };

    let inline_bytes = match request.file_data.as_deref() {
        Some(encoded) => Some(
            BASE64
                .decode(encoded)
                .map_err(|e| ProcessError::InvalidFileData(e.to_string()))?,
        ),
        None => None,
    };

    Ok((bucket_name, file_name, inline_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bucket_is_a_validation_error() {
        let request = ProcessInvoiceRequest {
            file_name: Some("invoice.pdf".to_string()),
            ..Default::default()
        };

        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ProcessError::MissingField("bucket_name")));
        assert_eq!(err.stage(), "validation");
    }

    #[test]
    fn empty_file_name_is_a_validation_error() {
        let request = ProcessInvoiceRequest {
            bucket_name: Some("b1".to_string()),
            file_name: Some(String::new()),
            ..Default::default()
        };

        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ProcessError::MissingField("file_name")));
    }

    #[test]
    fn inline_file_data_is_decoded() {
        let request = ProcessInvoiceRequest {
            bucket_name: Some("b1".to_string()),
            file_name: Some("invoice.pdf".to_string()),
            file_data: Some(BASE64.encode(b"%PDF-1.4 test")),
        };

        let (_, _, bytes) = validate_request(&request).unwrap();
        assert_eq!(bytes.unwrap(), b"%PDF-1.4 test");
    }

    #[test]
    fn bad_base64_is_a_validation_error() {
        let request = ProcessInvoiceRequest {
            bucket_name: Some("b1".to_string()),
            file_name: Some("invoice.pdf".to_string()),
            file_data: Some("not base64 !!!".to_string()),
        };

        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidFileData(_)));
        assert_eq!(err.stage(), "validation");
    }

    #[test]
    fn stage_tags_are_canonical() {
        assert_eq!(
            ProcessError::SourceNotFound {
                bucket: "b1".to_string(),
                object: "invoice.pdf".to_string()
            }
            .stage(),
            "gcs-fetch"
        );
        assert_eq!(ProcessError::Extract("boom".to_string()).stage(), "document-ai");
        assert_eq!(ProcessError::Persist("boom".to_string()).stage(), "upload");
    }
}
