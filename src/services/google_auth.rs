// ============================================================================
// GOOGLE OAUTH2 TOKEN PROVIDER
// ============================================================================
//
// All three Google collaborators (GCS, Document AI, Drive) authenticate with
// OAuth 2.0 bearer tokens from Application Default Credentials:
// - On Cloud Run the ambient service account is used, no keyfile needed
// - Locally, GOOGLE_APPLICATION_CREDENTIALS points at a service account JSON
//
// Tokens are fetched per scope and cached for 50 minutes (they last an hour).
//
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// OAuth scope for GCS object reads and writes.
pub const SCOPE_STORAGE: &str = "https://www.googleapis.com/auth/devstorage.read_write";
/// OAuth scope for Document AI processing.
pub const SCOPE_CLOUD_PLATFORM: &str = "https://www.googleapis.com/auth/cloud-platform";
/// OAuth scope for creating files in the shared Drive folder.
pub const SCOPE_DRIVE_FILE: &str = "https://www.googleapis.com/auth/drive.file";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("failed to resolve GCP credentials: {0}")]
    Provider(String),

    #[error("failed to obtain OAuth token: {0}")]
    Token(String),
}

/// Capability the pipeline services depend on to authenticate outbound calls.
/// Resolved once at startup; tests substitute [`StaticTokenProvider`].
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self, scope: &str) -> Result<String, AuthError>;
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Token provider backed by `gcp_auth` Application Default Credentials.
pub struct GcpTokenProvider {
    provider: Arc<dyn gcp_auth::TokenProvider>,
    cache: RwLock<HashMap<String, CachedToken>>,
}

impl GcpTokenProvider {
    pub async fn new() -> Result<Self, AuthError> {
        let provider = gcp_auth::provider()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        Ok(Self {
            provider,
            cache: RwLock::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for GcpTokenProvider {
    async fn access_token(&self, scope: &str) -> Result<String, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(scope) {
                // Reuse only while at least 5 minutes of validity remain
                if cached.expires_at > Utc::now() + Duration::minutes(5) {
                    return Ok(cached.token.clone());
                }
            }
        }

        let token = self
            .provider
            .token(&[scope])
            .await
            .map_err(|e| AuthError::Token(e.to_string()))?;
        let token_string = token.as_str().to_string();

        let expires_at = Utc::now() + Duration::minutes(50);
        {
            let mut cache = self.cache.write().await;
            cache.insert(
                scope.to_string(),
                CachedToken {
                    token: token_string.clone(),
                    expires_at,
                },
            );
        }

        debug!(scope = %scope, "Obtained new OAuth token, valid until {}", expires_at);
        Ok(token_string)
    }
}

/// Fixed-token provider for tests and local runs against emulators.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self, _scope: &str) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}
