//! Configuration for the invoice OCR service.
//!
//! Everything comes from the environment (with `.env` support via dotenvy),
//! grouped into one `Config` built once at startup and shared through
//! `AppState`. The `*_API_BASE_URL` overrides exist so tests can point the
//! service at a local mock instead of the real Google endpoints.

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub document_ai: DocumentAiConfig,
    pub storage: StorageConfig,
    pub drive: DriveConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAiConfig {
    pub project_id: String,
    pub location: String,
    pub processor_id: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub api_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    pub folder_id: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub destination: OutputDestination,
}

/// Where the extracted-document JSON ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDestination {
    /// Back into the source GCS bucket, under the derived object name.
    Bucket,
    /// Into the configured shared Drive folder.
    Drive,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let project_id = env::var("GCP_PROJECT_ID")
            .map_err(|e| anyhow::anyhow!("GCP_PROJECT_ID must be set: {}", e))?;
        let processor_id = env::var("DOCAI_PROCESSOR_ID")
            .map_err(|e| anyhow::anyhow!("DOCAI_PROCESSOR_ID must be set: {}", e))?;
        let location = env::var("DOCAI_LOCATION").unwrap_or_else(|_| "eu".to_string());

        let destination = match env::var("OUTPUT_DESTINATION").as_deref() {
            Ok("drive") => OutputDestination::Drive,
            Ok("bucket") | Err(_) => OutputDestination::Bucket,
            Ok(other) => {
                tracing::warn!(
                    "Unknown OUTPUT_DESTINATION '{}', defaulting to 'bucket'",
                    other
                );
                OutputDestination::Bucket
            }
        };

        let folder_id = env::var("GDRIVE_FOLDER_ID").unwrap_or_default();
        if destination == OutputDestination::Drive && folder_id.is_empty() {
            anyhow::bail!("GDRIVE_FOLDER_ID must be set when OUTPUT_DESTINATION=drive");
        }

        Ok(Config {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()?,
            },
            document_ai: DocumentAiConfig {
                api_base_url: env::var("DOCAI_API_BASE_URL")
                    .unwrap_or_else(|_| format!("https://{}-documentai.googleapis.com", location)),
                project_id,
                location,
                processor_id,
            },
            storage: StorageConfig {
                api_base_url: env::var("GCS_API_BASE_URL")
                    .unwrap_or_else(|_| "https://storage.googleapis.com".to_string()),
            },
            drive: DriveConfig {
                api_base_url: env::var("DRIVE_API_BASE_URL")
                    .unwrap_or_else(|_| "https://www.googleapis.com".to_string()),
                folder_id,
            },
            output: OutputConfig { destination },
        })
    }
}

impl DocumentAiConfig {
    /// Full `:process` endpoint for the configured processor identity.
    pub fn process_endpoint(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/processors/{}:process",
            self.api_base_url, self.project_id, self.location, self.processor_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_endpoint_includes_processor_identity() {
        let config = DocumentAiConfig {
            project_id: "neon-net-459709".to_string(),
            location: "eu".to_string(),
            processor_id: "f3503305350e4b03".to_string(),
            api_base_url: "https://eu-documentai.googleapis.com".to_string(),
        };

        assert_eq!(
            config.process_endpoint(),
            "https://eu-documentai.googleapis.com/v1/projects/neon-net-459709/locations/eu/processors/f3503305350e4b03:process"
        );
    }
}
