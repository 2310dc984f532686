//! Client configuration, read from the environment once at startup.

use std::time::Duration;

use taller_core::pagination::DEFAULT_LIMIT;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every resource path is appended to.
    pub base_url: String,
    /// Fixed per-request timeout.
    pub request_timeout: Duration,
    /// Page size used when a list is loaded without an explicit limit.
    pub default_page_size: u32,
    /// Client-side route shown when the session expires.
    pub login_route: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_page_size: DEFAULT_LIMIT,
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `TALLER_API_URL`, `TALLER_REQUEST_TIMEOUT_SECS`,
    /// `TALLER_PAGE_SIZE` and `TALLER_LOGIN_ROUTE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] with an arbitrary variable source.
    /// Unparseable values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("TALLER_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("TALLER_API_URL not set; using {}", DEFAULT_API_URL);
                defaults.base_url.clone()
            });

        let request_timeout = match lookup("TALLER_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "invalid TALLER_REQUEST_TIMEOUT_SECS; using default");
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        let default_page_size = match lookup("TALLER_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    tracing::warn!(value = %raw, "invalid TALLER_PAGE_SIZE; using default");
                    defaults.default_page_size
                }
            },
            None => defaults.default_page_size,
        };

        let login_route = lookup("TALLER_LOGIN_ROUTE")
            .map(|v| v.trim().to_string())
            .filter(|v| v.starts_with('/'))
            .unwrap_or(defaults.login_route);

        Self {
            base_url,
            request_timeout,
            default_page_size,
            login_route,
        }
    }

    /// Absolute URL for a resource path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
