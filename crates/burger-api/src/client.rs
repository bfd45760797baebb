//! API client and the resilient request executor.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::refresh::CredentialRefresher;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, HttpTransport, Transport};
use crate::validator;

/// Entry point for every endpoint of the service.
///
/// Endpoint functions live in [`crate::endpoints`] as methods on this type.
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    refresher: CredentialRefresher,
}

impl ApiClient {
    /// Client talking HTTP through `reqwest`.
    pub fn new(config: ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport), session))
    }

    pub fn with_transport(
        config: ApiConfig,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
    ) -> Self {
        let refresher = CredentialRefresher::new(&config, Arc::clone(&transport), Arc::clone(&session));
        Self {
            config,
            transport,
            session,
            refresher,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn refresher(&self) -> &CredentialRefresher {
        &self.refresher
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Attach the stored access token to an authenticated request.
    pub(crate) fn authorized(&self, request: ApiRequest) -> ApiRequest {
        let token = self.session.get_access();
        request.with_authorization(token.as_deref())
    }

    /// Send once and validate the envelope. Used by anonymous endpoints.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.transport.send(request).await?;
        validator::decode(response)
    }

    /// Send, and if the server reports an expired access token, refresh the
    /// credentials and resend the same request once with the new token.
    ///
    /// Any other failure is returned unchanged. A refresh failure replaces the
    /// original expiry failure, and an expiry on the retried call is returned
    /// as is.
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    pub async fn fetch_with_refresh<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let generation = self.refresher.generation();

        match self.fetch(request.clone()).await {
            Err(ApiError::ExpiredCredential { .. }) => {
                warn!("Access token expired, refreshing credentials");
                let pair = self.refresher.refresh_since(generation).await?;

                let mut retry = request;
                retry.set_authorization(Some(&pair.access_token));
                self.fetch(retry).await
            }
            result => result,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("session", &self.session)
            .finish()
    }
}
