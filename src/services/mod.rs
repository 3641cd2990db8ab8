pub mod docai_service;
pub mod drive_service;
pub mod gcs_service;
pub mod google_auth;
pub mod invoice_pipeline;

pub use invoice_pipeline::{InvoicePipeline, ProcessError, ProcessOutcome};
