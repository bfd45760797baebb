//! Outbound HTTP seam.
//!
//! Everything above this module talks to [`Transport`], so the refresh and
//! retry logic can be exercised against a scripted transport in tests while
//! production code goes through [`HttpTransport`].

use std::sync::OnceLock;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// A request as built by an endpoint function.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Attach a JSON body together with its content type.
    pub fn with_json(mut self, body: Value) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        self.body = Some(body);
        self
    }

    /// Mark the request as JSON without a body.
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        self
    }

    /// Set or replace the `authorization` header.
    ///
    /// A token that cannot be represented as a header value is dropped, which
    /// makes the server answer with an authorization failure.
    pub fn with_authorization(mut self, token: Option<&str>) -> Self {
        self.set_authorization(token);
        self
    }

    pub fn set_authorization(&mut self, token: Option<&str>) {
        match token.and_then(|t| HeaderValue::from_str(&bearer(t)).ok()) {
            Some(value) => {
                self.headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.headers.remove(AUTHORIZATION);
            }
        }
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Authorization header value for an access token.
///
/// The service hands out access tokens that already carry the `Bearer `
/// scheme; those are sent verbatim.
pub fn bearer(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

/// Raw response before envelope validation.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience constructor for a JSON body.
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Transport-level success (2xx).
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }
}

/// Sends requests over the wire.
///
/// Implementations only fail with [`ApiError::Network`]; status codes and
/// body contents are judged by the validator.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, ApiError>;
}

/// Install the process-wide rustls crypto provider once.
pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Another crate got there first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        install_rustls_provider();
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<TransportResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "Received response");
        Ok(TransportResponse { status, body })
    }
}
