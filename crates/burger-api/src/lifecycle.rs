//! Request lifecycle as seen by state containers.
//!
//! A consumer tracks each call as pending, fulfilled with a payload, or
//! rejected with a display message, and nothing else.

use std::future::Future;

use tracing::debug;

use crate::error::ApiError;
use crate::messages::{Endpoint, resolve_message};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> RequestState<T> {
    /// Settle a finished call, turning a failure into its display message.
    pub fn settle(endpoint: Endpoint, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Fulfilled(value),
            Err(e) => {
                debug!(%endpoint, error = %e, "Request rejected");
                Self::Rejected(resolve_message(endpoint, &e))
            }
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Fulfilled(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// Drive `future` for `endpoint`, reporting each transition to `on_change`.
///
/// `on_change` sees `Pending` first and then the settled state, which is also
/// returned.
pub async fn track<T, F, C>(endpoint: Endpoint, future: F, mut on_change: C) -> RequestState<T>
where
    F: Future<Output = Result<T, ApiError>>,
    C: FnMut(&RequestState<T>),
{
    on_change(&RequestState::Pending);
    let state = RequestState::settle(endpoint, future.await);
    on_change(&state);
    state
}
