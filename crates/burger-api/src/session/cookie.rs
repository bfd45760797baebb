//! Short-lived, cookie-scoped storage.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// When a cookie stops being readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expires {
    /// Seconds from the moment the cookie is set. Zero or negative values
    /// expire the cookie immediately.
    In(i64),
    At(DateTime<Utc>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub path: Option<String>,
    /// `None` makes a session cookie that lives as long as the jar.
    pub expires: Option<Expires>,
}

impl CookieOptions {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.expires = Some(Expires::In(seconds));
        self
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(Expires::At(at));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Cookie {
    /// Percent-encoded value.
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires: Option<DateTime<Utc>>,
}

impl Cookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_none_or(|at| at > now)
    }
}

/// In-process cookie jar.
///
/// Expired cookies are invisible to readers and dropped on the next write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    cookies: HashMap<String, Cookie>,
}

/// Absolute expiry `seconds` after `now`.
///
/// Past the representable range a positive offset never expires and a
/// negative one is already stale.
fn expiry_after(now: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    match TimeDelta::try_seconds(seconds).and_then(|delta| now.checked_add_signed(delta)) {
        Some(at) => Some(at),
        None if seconds > 0 => None,
        None => Some(now),
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cookie(&mut self, name: &str, value: &str, options: CookieOptions) {
        let now = Utc::now();
        let expires = options.expires.and_then(|expires| match expires {
            Expires::In(seconds) => expiry_after(now, seconds),
            Expires::At(at) => Some(at),
        });

        self.cookies.retain(|_, cookie| cookie.is_live(now));
        self.cookies.insert(
            name.to_string(),
            Cookie {
                value: urlencoding::encode(value).into_owned(),
                path: options.path,
                expires,
            },
        );
    }

    /// Decoded value of a live cookie.
    pub fn get_cookie(&self, name: &str) -> Option<String> {
        let cookie = self.cookies.get(name)?;
        if !cookie.is_live(Utc::now()) {
            return None;
        }
        match urlencoding::decode(&cookie.value) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(_) => Some(cookie.value.clone()),
        }
    }

    pub fn delete_cookie(&mut self, name: &str) {
        let path = self.cookies.get(name).and_then(|c| c.path.clone());
        self.set_cookie(
            name,
            "",
            CookieOptions {
                path,
                expires: Some(Expires::In(-1)),
            },
        );
    }

    /// Path a live cookie was scoped to.
    pub fn cookie_path(&self, name: &str) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|c| c.is_live(Utc::now()))
            .and_then(|c| c.path.as_deref())
    }

    /// `name=value` pairs of every live cookie, as sent in a `Cookie` header.
    pub fn header_value(&self) -> String {
        let now = Utc::now();
        let mut pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|(_, c)| c.is_live(now))
            .map(|(name, c)| format!("{}={}", name, c.value))
            .collect();
        pairs.sort();
        pairs.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_cookie() {
        let mut jar = CookieJar::new();
        jar.set_cookie("testCookie", "testValue", CookieOptions::default().expires_in(3600));
        assert_eq!(jar.get_cookie("testCookie").as_deref(), Some("testValue"));
    }

    #[test]
    fn test_missing_cookie_is_none() {
        let jar = CookieJar::new();
        assert_eq!(jar.get_cookie("nonExistingCookie"), None);
    }

    #[test]
    fn test_expiry_date() {
        let mut jar = CookieJar::new();
        let later = Utc::now() + TimeDelta::hours(1);
        jar.set_cookie("expireCookie", "expireTestValue", CookieOptions::default().expires_at(later));
        assert_eq!(jar.get_cookie("expireCookie").as_deref(), Some("expireTestValue"));

        let earlier = Utc::now() - TimeDelta::hours(1);
        jar.set_cookie("staleCookie", "value", CookieOptions::default().expires_at(earlier));
        assert_eq!(jar.get_cookie("staleCookie"), None);
    }

    #[test]
    fn test_out_of_range_expiry_does_not_panic() {
        let mut jar = CookieJar::new();
        jar.set_cookie("accessToken", "t", CookieOptions::default().expires_in(i64::MAX));
        assert_eq!(jar.get_cookie("accessToken").as_deref(), Some("t"));

        jar.set_cookie("huge", "t", CookieOptions::default().expires_in(9_000_000_000_000));
        assert_eq!(jar.get_cookie("huge").as_deref(), Some("t"));

        jar.set_cookie("stale", "t", CookieOptions::default().expires_in(i64::MIN));
        assert_eq!(jar.get_cookie("stale"), None);

        let json = serde_json::to_string(&jar).unwrap();
        let restored: CookieJar = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get_cookie("accessToken").as_deref(), Some("t"));
    }

    #[test]
    fn test_delete_cookie() {
        let mut jar = CookieJar::new();
        jar.set_cookie("deleteCookie", "deleteTestValue", CookieOptions::default().expires_in(3600));
        assert_eq!(jar.get_cookie("deleteCookie").as_deref(), Some("deleteTestValue"));

        jar.delete_cookie("deleteCookie");
        assert_eq!(jar.get_cookie("deleteCookie"), None);
    }

    #[test]
    fn test_path_is_kept() {
        let mut jar = CookieJar::new();
        jar.set_cookie("pathCookie", "pathTestValue", CookieOptions::default().with_path("/"));
        assert_eq!(jar.cookie_path("pathCookie"), Some("/"));
        assert!(jar.header_value().contains("pathCookie=pathTestValue"));
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let mut jar = CookieJar::new();
        jar.set_cookie("accessToken", "Bearer a b;c", CookieOptions::default());
        assert_eq!(jar.header_value(), "accessToken=Bearer%20a%20b%3Bc");
        assert_eq!(jar.get_cookie("accessToken").as_deref(), Some("Bearer a b;c"));
    }

    #[test]
    fn test_jar_serializes_live_state() {
        let mut jar = CookieJar::new();
        jar.set_cookie("accessToken", "token", CookieOptions::default().with_path("/"));

        let json = serde_json::to_string(&jar).unwrap();
        let restored: CookieJar = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get_cookie("accessToken").as_deref(), Some("token"));
    }
}
