// ============================================================================
// GCS STORAGE SERVICE - Cloud Storage JSON API
// ============================================================================
//
// Object download and upload over the JSON API:
// - GET  {base}/storage/v1/b/{bucket}/o/{object}?alt=media
// - POST {base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}
//
// The base URL is configurable so tests can point at a wiremock server.
//
// ============================================================================

use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

use crate::services::google_auth::{AccessTokenProvider, AuthError, SCOPE_STORAGE};

// Unreserved characters stay literal; everything else (notably '/') is escaped
// so object names with path separators address a single JSON API path segment.
const OBJECT_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object '{object}' not found in bucket '{bucket}'")]
    NotFound { bucket: String, object: String },

    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Clone)]
pub struct GcsService {
    http_client: Client,
    tokens: Arc<dyn AccessTokenProvider>,
    api_base_url: String,
}

impl GcsService {
    pub fn new(
        http_client: Client,
        tokens: Arc<dyn AccessTokenProvider>,
        api_base_url: String,
    ) -> Self {
        Self {
            http_client,
            tokens,
            api_base_url,
        }
    }

    fn object_url(&self, bucket: &str, object: &str) -> String {
        format!(
            "{}/storage/v1/b/{}/o/{}",
            self.api_base_url,
            bucket,
            utf8_percent_encode(object, OBJECT_PATH_SET)
        )
    }

    /// Downloads the object's bytes. A 404 from the API becomes
    /// [`StorageError::NotFound`]; every other non-success status is surfaced
    /// with its body.
    pub async fn download_object(&self, bucket: &str, object: &str) -> Result<Bytes, StorageError> {
        let token = self.tokens.access_token(SCOPE_STORAGE).await?;

        debug!(bucket = %bucket, object = %object, "Downloading object from GCS");

        let response = self
            .http_client
            .get(self.object_url(bucket, object))
            .query(&[("alt", "media")])
            .bearer_auth(&token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let content = response.bytes().await?;
                info!(
                    bucket = %bucket,
                    object = %object,
                    size_bytes = content.len(),
                    "Object downloaded from GCS"
                );
                Ok(content)
            }
            StatusCode::NOT_FOUND => Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                object: object.to_string(),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StorageError::Api { status, body })
            }
        }
    }

    /// Uploads `content` as `object` with the given content type, overwriting
    /// any previous object under the same name. Returns the `gs://` location.
    pub async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let token = self.tokens.access_token(SCOPE_STORAGE).await?;

        let response = self
            .http_client
            .post(format!(
                "{}/upload/storage/v1/b/{}/o",
                self.api_base_url, bucket
            ))
            .query(&[("uploadType", "media"), ("name", object)])
            .bearer_auth(&token)
            .header("Content-Type", content_type)
            .body(content)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api { status, body });
        }

        let location = format!("gs://{}/{}", bucket, object);
        info!(location = %location, "Object uploaded to GCS");
        Ok(location)
    }
}
