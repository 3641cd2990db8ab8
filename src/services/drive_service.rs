// ============================================================================
// DRIVE SERVICE - Drive v3 multipart file creation
// ============================================================================
//
// Creates the result JSON inside the configured shared folder using the
// multipart upload form:
// POST {base}/upload/drive/v3/files?uploadType=multipart&fields=id
// with a multipart/related body of metadata JSON + media JSON.
//
// ============================================================================

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::config::DriveConfig;
use crate::services::google_auth::{AccessTokenProvider, AuthError, SCOPE_DRIVE_FILE};

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("Drive request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Drive API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    #[serde(default)]
    id: String,
}

#[derive(Clone)]
pub struct DriveService {
    http_client: Client,
    tokens: Arc<dyn AccessTokenProvider>,
    config: DriveConfig,
}

impl DriveService {
    pub fn new(
        http_client: Client,
        tokens: Arc<dyn AccessTokenProvider>,
        config: DriveConfig,
    ) -> Self {
        Self {
            http_client,
            tokens,
            config,
        }
    }

    /// Creates `name` in the configured folder with the given JSON content.
    /// Returns a `drive://{folder_id}/{name}` location string.
    pub async fn create_json_file(
        &self,
        name: &str,
        content: Vec<u8>,
    ) -> Result<String, DriveError> {
        let token = self.tokens.access_token(SCOPE_DRIVE_FILE).await?;

        let metadata = json!({
            "name": name,
            "parents": [self.config.folder_id],
        });

        // multipart/related is not reqwest's form-data multipart, so the body
        // is assembled by hand: one metadata part, one media part.
        let boundary = format!("invoice-ocr-{}", Uuid::new_v4());
        let mut body = Vec::with_capacity(content.len() + 512);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Type: application/json\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(&content);
        body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());

        let response = self
            .http_client
            .post(format!("{}/upload/drive/v3/files", self.config.api_base_url))
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .bearer_auth(&token)
            .header(
                "Content-Type",
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Api { status, body });
        }

        let file: DriveFile = response.json().await?;
        info!(
            file_id = %file.id,
            folder_id = %self.config.folder_id,
            name = %name,
            "Result JSON uploaded to Drive"
        );
        Ok(format!("drive://{}/{}", self.config.folder_id, name))
    }
}
