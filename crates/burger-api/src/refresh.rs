//! Credential refresh.
//!
//! Exchanges the stored refresh token for a new pair in one round trip and
//! persists the result. Refreshes are single-flight: concurrent requests that
//! hit an expired token wait on one guard, and whoever arrives after a
//! successful refresh reuses the stored pair instead of refreshing again.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::CredentialPair;
use crate::session::SessionStore;
use crate::transport::{ApiRequest, Transport};
use crate::validator;

pub const REFRESH_PATH: &str = "/auth/token";

pub struct CredentialRefresher {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    url: String,
    /// Held for the whole exchange so only one refresh is in flight.
    guard: Mutex<()>,
    /// Bumped after every successful refresh.
    generation: AtomicU64,
}

impl CredentialRefresher {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self {
            transport,
            session,
            url: config.endpoint(REFRESH_PATH),
            guard: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of successful refreshes so far.
    ///
    /// Record it before a request and hand it to [`Self::refresh_since`] if that
    /// request turns out to carry an expired token.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Refresh unconditionally.
    pub async fn refresh(&self) -> Result<CredentialPair, ApiError> {
        let _guard = self.guard.lock().await;
        self.exchange().await
    }

    /// Refresh unless another refresh completed after `observed` was read.
    pub async fn refresh_since(&self, observed: u64) -> Result<CredentialPair, ApiError> {
        let _guard = self.guard.lock().await;

        // Double-check after acquiring the guard (another task may have refreshed)
        if self.generation() != observed
            && let Some(pair) = self.session.credentials()
        {
            debug!("Reusing credentials refreshed by a concurrent request");
            return Ok(pair);
        }

        self.exchange().await
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn exchange(&self) -> Result<CredentialPair, ApiError> {
        let Some(refresh_token) = self.session.get_refresh() else {
            warn!("Missing refresh token - cannot refresh credentials");
            return Err(ApiError::MissingRefreshToken);
        };

        let request = ApiRequest::post(&self.url).with_json(json!({ "token": refresh_token }));

        let result = match self.transport.send(request).await {
            Ok(response) => validator::decode::<CredentialPair>(response),
            Err(e) => Err(e),
        };

        match result {
            Ok(pair) => {
                self.session.store_pair(&pair);
                self.generation.fetch_add(1, Ordering::AcqRel);
                info!("Credential refresh successful");
                Ok(pair)
            }
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), "Credential refresh failed");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for CredentialRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRefresher")
            .field("url", &self.url)
            .field("generation", &self.generation())
            .finish()
    }
}
