use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "BURGER_API_URL";

pub const DEFAULT_BASE_URL: &str = "https://norma.nomoreparties.space/api";

pub const DEFAULT_USER_AGENT: &str = concat!("burger-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL `{input}`: {source}")]
    InvalidBaseUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL `{0}` cannot carry a path")]
    CannotBeABase(String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root every endpoint path is resolved against.
    pub base_url: Url,

    /// Overall request timeout. `None` leaves it to the transport default.
    pub timeout: Option<Duration>,

    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,

    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Build a configuration for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Read the base URL from [`BASE_URL_ENV`], falling back to the default
    /// service when the variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Absolute URL for an endpoint path such as `/auth/token`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

fn parse_base_url(input: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(input).map_err(|source| ConfigError::InvalidBaseUrl {
        input: input.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeABase(input.to_string()));
    }
    Ok(url)
}
