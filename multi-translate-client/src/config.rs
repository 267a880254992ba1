//! Client configuration
//!
//! # Environment
//!
//! [`ClientConfig::from_env`] reads:
//!
//! - `MULTI_TRANSLATE_BASE_URL` (required), e.g. `https://translate.example.com`
//! - `MULTI_TRANSLATE_TIMEOUT_SECS` (optional, default 30)
//! - `MULTI_TRANSLATE_LENIENT` (optional, `true`/`1` enables lenient coercion)

use crate::error::{ApiError, ApiResult};
use multi_translate::Coercion;
use std::time::Duration;

pub const BASE_URL_VAR: &str = "MULTI_TRANSLATE_BASE_URL";
pub const TIMEOUT_VAR: &str = "MULTI_TRANSLATE_TIMEOUT_SECS";
pub const LENIENT_VAR: &str = "MULTI_TRANSLATE_LENIENT";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service root without a trailing slash
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Sent with every request
    pub default_headers: Vec<(String, String)>,
    /// How response bodies are coerced into models
    pub coercion: Coercion,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("multi-translate-client/{}", env!("CARGO_PKG_VERSION")),
            default_headers: Vec::new(),
            coercion: Coercion::Strict,
        }
    }
}

impl ClientConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::Config("base URL cannot be empty".to_string()));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            ..Self::default()
        })
    }

    /// Build a configuration from `MULTI_TRANSLATE_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let base_url = lookup(BASE_URL_VAR)
            .ok_or_else(|| ApiError::Config(format!("{} environment variable not set", BASE_URL_VAR)))?;
        let mut config = Self::new(base_url)?;

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ApiError::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_VAR, raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(LENIENT_VAR) {
            if matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                config.coercion = Coercion::Lenient;
            }
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    /// Absolute URL for an API path such as `/translate`
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
