//! Structured failure type shared by every request path.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message the server puts in the envelope when the access token has expired.
pub const EXPIRY_SIGNAL: &str = "jwt expired";

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ExpiredCredential,
    ServerRejected,
    NetworkError,
    Malformed,
}

/// Every failure produced by the client.
///
/// Each request path yields exactly one of these; nothing is swallowed on the
/// way up to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the access token as expired. `body` is the
    /// decoded envelope carrying the expiry signal.
    #[error("credential expired (HTTP {status})")]
    ExpiredCredential { status: StatusCode, body: Value },

    /// A refresh was needed but no refresh token is stored.
    #[error("credential expired: no refresh token stored")]
    MissingRefreshToken,

    /// The server answered with a failing status or `success: false`.
    /// `body` is the decoded envelope, kept verbatim.
    #[error("request rejected by server (HTTP {status}): {}", message_of(.body).unwrap_or("no message"))]
    ServerRejected { status: StatusCode, body: Value },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    pub fn expired(status: StatusCode, body: Value) -> Self {
        Self::ExpiredCredential { status, body }
    }

    pub fn rejected(status: StatusCode, body: Value) -> Self {
        Self::ServerRejected { status, body }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ExpiredCredential { .. } | Self::MissingRefreshToken => {
                FailureKind::ExpiredCredential
            }
            Self::ServerRejected { .. } => FailureKind::ServerRejected,
            Self::Network(_) => FailureKind::NetworkError,
            Self::Malformed(_) => FailureKind::Malformed,
        }
    }

    /// Message supplied by the server, if any.
    ///
    /// Transport and decode failures have no server message; callers fall back
    /// to a per-endpoint default instead of showing internal error text.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ExpiredCredential { body, .. } | Self::ServerRejected { body, .. } => {
                message_of(body)
            }
            Self::MissingRefreshToken | Self::Network(_) | Self::Malformed(_) => None,
        }
    }

    /// The decoded server body for rejected requests.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::ExpiredCredential { body, .. } | Self::ServerRejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the user has to log in again to recover.
    #[inline]
    pub fn requires_relogin(&self) -> bool {
        self.kind() == FailureKind::ExpiredCredential
    }

    /// Whether the failure happened below the HTTP layer and may go away on its own.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

fn message_of(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}
