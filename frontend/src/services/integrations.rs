use shared::error::ClientError;
use shared::integration::IntegrationCapability;
use shared::models::{IntegrationStatus, Provider};

use crate::services::api::ApiService;
use crate::services::browser;

/// Capability descriptor backed by the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderApi(pub Provider);

impl IntegrationCapability for ProviderApi {
    fn provider(&self) -> Provider {
        self.0
    }

    async fn status(&self) -> Result<IntegrationStatus, ClientError> {
        ApiService::integration_status(self.0).await
    }

    async fn begin_oauth(&self) -> Result<(), ClientError> {
        let start = ApiService::start_oauth(self.0).await?;
        tracing::info!("Redirecting to {} consent screen", self.0.display_name());
        browser::redirect(&start.auth_url)
    }
}
