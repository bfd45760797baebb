//! Credential storage.
//!
//! The access token lives in a short-lived cookie jar and the refresh token in
//! durable storage, mirroring how a browser session keeps them apart.
//!
//! - [`CookieJar`]: cookie-scoped values with optional path and expiry
//! - [`DurableStore`]: storage that survives restarts ([`MemoryStorage`], [`FileStorage`])
//! - [`SessionStore`]: the pair of them, shared by the refresher and the endpoints

mod cookie;
mod storage;

use std::sync::Arc;

use parking_lot::Mutex;

pub use cookie::{CookieJar, CookieOptions, Expires};
pub use storage::{DurableStore, FileStorage, MemoryStorage, StorageError};

use crate::models::CredentialPair;

/// Cookie holding the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Durable key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Process-wide credential state, injected into the refresher and endpoints.
///
/// Writers do not coordinate; the last write wins.
pub struct SessionStore {
    cookies: Mutex<CookieJar>,
    durable: Arc<dyn DurableStore>,
}

impl SessionStore {
    pub fn new(durable: Arc<dyn DurableStore>) -> Self {
        Self::with_cookie_jar(durable, CookieJar::new())
    }

    /// Resume with a previously saved cookie jar.
    pub fn with_cookie_jar(durable: Arc<dyn DurableStore>, jar: CookieJar) -> Self {
        Self {
            cookies: Mutex::new(jar),
            durable,
        }
    }

    /// Session with nothing persisted outside the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn get_access(&self) -> Option<String> {
        self.cookies.lock().get_cookie(ACCESS_TOKEN_COOKIE)
    }

    pub fn set_access(&self, token: &str, options: CookieOptions) {
        self.cookies
            .lock()
            .set_cookie(ACCESS_TOKEN_COOKIE, token, options);
    }

    pub fn clear_access(&self) {
        self.cookies.lock().delete_cookie(ACCESS_TOKEN_COOKIE);
    }

    pub fn get_refresh(&self) -> Option<String> {
        self.durable.get_item(REFRESH_TOKEN_KEY)
    }

    pub fn set_refresh(&self, token: &str) {
        self.durable.set_item(REFRESH_TOKEN_KEY, token);
    }

    pub fn clear_refresh(&self) {
        self.durable.remove_item(REFRESH_TOKEN_KEY);
    }

    /// Replace both tokens.
    pub fn store_pair(&self, pair: &CredentialPair) {
        self.set_access(&pair.access_token, CookieOptions::default());
        self.set_refresh(&pair.refresh_token);
    }

    /// Drop both tokens.
    pub fn clear(&self) {
        self.clear_access();
        self.clear_refresh();
    }

    /// Both tokens, if both are held.
    pub fn credentials(&self) -> Option<CredentialPair> {
        Some(CredentialPair {
            access_token: self.get_access()?,
            refresh_token: self.get_refresh()?,
        })
    }

    /// Copy of the cookie jar, for carrying it across process restarts.
    pub fn cookie_jar(&self) -> CookieJar {
        self.cookies.lock().clone()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_access", &self.get_access().is_some())
            .field("has_refresh", &self.get_refresh().is_some())
            .finish()
    }
}
