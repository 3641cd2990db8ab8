//! Request/response models for the invoice processing endpoints.

use serde::{Deserialize, Serialize};

/// Suffix replacing the source file's extension on the persisted JSON artifact.
pub const OUTPUT_SUFFIX: &str = "_OCRed.json";

/// Body of `POST /process-invoice`.
///
/// Fields are optional at the serde level so that missing ones reach the
/// validation stage and come back as a structured 400 instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessInvoiceRequest {
    #[serde(default)]
    pub bucket_name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    /// Base64-encoded PDF bytes. When present the storage fetch is skipped.
    #[serde(default)]
    pub file_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessInvoiceResponse {
    pub status: String,
    pub message: String,
    pub output_location: String,
}

impl ProcessInvoiceResponse {
    pub fn success(message: String, output_location: String) -> Self {
        Self {
            status: "success".to_string(),
            message,
            output_location,
        }
    }
}

/// Body of the `POST /gcs-file-test` debug endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GcsFileTestRequest {
    #[serde(default)]
    pub bucket_name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Derives the destination object name from the source file name by replacing
/// the final extension segment with [`OUTPUT_SUFFIX`].
///
/// `invoice.pdf` -> `invoice_OCRed.json`; extensionless names get the suffix
/// appended.
pub fn output_object_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => format!("{}{}", stem, OUTPUT_SUFFIX),
        _ => format!("{}{}", file_name, OUTPUT_SUFFIX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_final_extension_segment() {
        assert_eq!(output_object_name("invoice.pdf"), "invoice_OCRed.json");
        assert_eq!(output_object_name("Invoice.PDF"), "Invoice_OCRed.json");
    }

    #[test]
    fn only_last_extension_is_replaced() {
        assert_eq!(
            output_object_name("2025.05.invoice.pdf"),
            "2025.05.invoice_OCRed.json"
        );
    }

    #[test]
    fn extensionless_names_get_suffix_appended() {
        assert_eq!(output_object_name("invoice"), "invoice_OCRed.json");
    }

    #[test]
    fn dotfile_names_are_treated_as_extensionless() {
        assert_eq!(output_object_name(".invoice"), ".invoice_OCRed.json");
    }
}
