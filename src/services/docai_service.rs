// ============================================================================
// DOCUMENT AI SERVICE - Document AI v1 REST API
// ============================================================================
//
// Synchronous processing of a single PDF through the configured processor:
// POST {base}/v1/projects/{project}/locations/{location}/processors/{id}:process
// with the PDF inlined as a base64 rawDocument. The response's `document` is
// kept as a plain JSON value; this service never interprets the extraction
// beyond requiring it to be present.
//
// ============================================================================

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DocumentAiConfig;
use crate::services::google_auth::{AccessTokenProvider, AuthError, SCOPE_CLOUD_PLATFORM};

#[derive(Debug, thiserror::Error)]
pub enum DocAiError {
    #[error("Document AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Document AI returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Document AI response contained no document")]
    EmptyDocument,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessDocumentRequest {
    raw_document: RawDocument,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    content: String,
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct ProcessDocumentResponse {
    #[serde(default)]
    document: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct DocumentAiService {
    http_client: Client,
    tokens: Arc<dyn AccessTokenProvider>,
    config: DocumentAiConfig,
}

impl DocumentAiService {
    pub fn new(
        http_client: Client,
        tokens: Arc<dyn AccessTokenProvider>,
        config: DocumentAiConfig,
    ) -> Self {
        Self {
            http_client,
            tokens,
            config,
        }
    }

    /// Runs the processor over `content` and returns the structured document
    /// as a JSON value. An empty or missing document counts as a failure.
    pub async fn process_document(
        &self,
        content: &[u8],
        mime_type: &str,
    ) -> Result<serde_json::Value, DocAiError> {
        let token = self.tokens.access_token(SCOPE_CLOUD_PLATFORM).await?;

        let request = ProcessDocumentRequest {
            raw_document: RawDocument {
                content: BASE64.encode(content),
                mime_type: mime_type.to_string(),
            },
        };

        debug!(
            processor_id = %self.config.processor_id,
            size_bytes = content.len(),
            "Submitting document to Document AI"
        );

        let response = self
            .http_client
            .post(self.config.process_endpoint())
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocAiError::Api { status, body });
        }

        let parsed: ProcessDocumentResponse = response.json().await?;
        let document = match parsed.document {
            Some(doc) if !doc.is_null() => doc,
            _ => return Err(DocAiError::EmptyDocument),
        };

        info!(
            processor_id = %self.config.processor_id,
            "Document processed by Document AI"
        );
        Ok(document)
    }
}
