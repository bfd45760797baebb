//! Client for the Stellar Burgers ordering API.
//!
//! The interesting part is authentication: authenticated calls carry the
//! stored access token, and when the server reports it as expired the client
//! refreshes the credential pair once and replays the call.
//!
//! # Architecture
//!
//! - [`SessionStore`]: access token in a cookie jar, refresh token in durable storage
//! - [`validator`]: turns raw responses into payloads or an [`ApiError`]
//! - [`CredentialRefresher`]: single-flight exchange of the refresh token
//! - [`ApiClient::fetch_with_refresh`]: the refresh-and-retry executor
//! - [`endpoints`]: one method per resource action on [`ApiClient`]
//! - [`messages`] / [`lifecycle`]: display messages and request states for consumers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use burger_api::{ApiClient, ApiConfig, SessionStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ApiConfig::from_env()?, Arc::new(SessionStore::in_memory()))?;
//! let ingredients = client.get_ingredients().await?;
//! println!("{} ingredients", ingredients.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod lifecycle;
pub mod messages;
pub mod models;
pub mod refresh;
pub mod session;
pub mod transport;
pub mod validator;

pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, FailureKind};
pub use lifecycle::RequestState;
pub use messages::{API_ERROR, Endpoint, resolve_message};
pub use models::CredentialPair;
pub use refresh::CredentialRefresher;
pub use session::SessionStore;
pub use transport::{ApiRequest, HttpTransport, Transport, TransportResponse};
