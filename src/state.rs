use reqwest::Client as ReqwestClient;
use std::sync::Arc;

use crate::config::Config;
use crate::services::docai_service::DocumentAiService;
use crate::services::drive_service::DriveService;
use crate::services::gcs_service::GcsService;
use crate::services::google_auth::{AccessTokenProvider, GcpTokenProvider};
use crate::services::InvoicePipeline;

/// Shared application state: configuration, the outbound HTTP client and the
/// processing pipeline, all built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: ReqwestClient,
    pub pipeline: InvoicePipeline,
}

impl AppState {
    /// Builds the state from the environment, resolving ambient Google
    /// credentials once (Application Default Credentials on Cloud Run).
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let tokens: Arc<dyn AccessTokenProvider> = Arc::new(GcpTokenProvider::new().await?);
        Self::with_token_provider(config, tokens)
    }

    /// Builds the state with an explicit token provider. Tests use this to
    /// substitute a static token and mock-server base URLs.
    pub fn with_token_provider(
        config: Config,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> anyhow::Result<Self> {
        let http_client = ReqwestClient::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        let gcs = GcsService::new(
            http_client.clone(),
            tokens.clone(),
            config.storage.api_base_url.clone(),
        );
        let docai = DocumentAiService::new(
            http_client.clone(),
            tokens.clone(),
            config.document_ai.clone(),
        );
        let drive = DriveService::new(http_client.clone(), tokens, config.drive.clone());

        let pipeline = InvoicePipeline::new(gcs, docai, drive, config.output.destination);

        Ok(AppState {
            config,
            http_client,
            pipeline,
        })
    }
}
