//! Client configuration.
//!
//! Defaults, overridden by `WAREFLOW_*` environment variables, overridden in
//! turn by CLI flags.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use wareflow_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{ClientError, ClientResult};

pub const ENV_API_URL: &str = "WAREFLOW_API_URL";
pub const ENV_AUTH_TOKEN: &str = "WAREFLOW_AUTH_TOKEN";
pub const ENV_DATA_SOURCE: &str = "WAREFLOW_DATA_SOURCE";
pub const ENV_PAGE_SIZE: &str = "WAREFLOW_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "WAREFLOW_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where repositories get their data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Http,
    /// In-memory fixtures; no backend needed.
    Mock,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Http => "http",
            DataSource::Mock => "mock",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" | "api" => Ok(DataSource::Http),
            "mock" => Ok(DataSource::Mock),
            other => Err(ClientError::config(format!(
                "unknown data source '{other}' (expected http or mock)"
            ))),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Bearer token to start with (e.g. from a previous `login`).
    pub auth_token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub data_source: DataSource,
    /// Rows per page for list stores.
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("wareflow/", env!("CARGO_PKG_VERSION")).to_string(),
            data_source: DataSource::Http,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("data_source", &self.data_source)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ClientConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config = config.with_api_base_url(url)?;
        }
        if let Some(token) = get(ENV_AUTH_TOKEN) {
            config.auth_token = Some(token.trim().to_string());
        }
        if let Some(source) = get(ENV_DATA_SOURCE) {
            config.data_source = source.parse()?;
        }
        if let Some(size) = get(ENV_PAGE_SIZE) {
            let size: u32 = size
                .trim()
                .parse()
                .map_err(|_| ClientError::config(format!("{ENV_PAGE_SIZE} must be a number, got '{size}'")))?;
            config = config.with_page_size(size)?;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ClientError::config(format!("{ENV_TIMEOUT_SECS} must be a number, got '{secs}'")))?;
            if secs == 0 {
                return Err(ClientError::config(format!("{ENV_TIMEOUT_SECS} must be positive")));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> ClientResult<Self> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::config(format!(
                "api url must start with http:// or https://, got '{url}'"
            )));
        }
        self.api_base_url = url;
        Ok(self)
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_data_source(mut self, source: DataSource) -> Self {
        self.data_source = source;
        self
    }

    pub fn with_page_size(mut self, size: u32) -> ClientResult<Self> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ClientError::config(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
            )));
        }
        self.page_size = size;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.data_source, DataSource::Http);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://wms.example.com/"),
            (ENV_AUTH_TOKEN, "abc"),
            (ENV_DATA_SOURCE, "MOCK"),
            (ENV_PAGE_SIZE, "50"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://wms.example.com");
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert_eq!(config.data_source, DataSource::Mock);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for pairs in [
            [(ENV_PAGE_SIZE, "lots")],
            [(ENV_PAGE_SIZE, "500")],
            [(ENV_TIMEOUT_SECS, "0")],
            [(ENV_DATA_SOURCE, "ftp")],
            [(ENV_API_URL, "localhost:8000")],
        ] {
            let err = ClientConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, ClientError::Config(_)), "{pairs:?} gave {err:?}");
        }
    }

    #[test]
    fn debug_redacts_the_token() {
        let config = ClientConfig::default().with_auth_token(Some("secret".into()));
        assert!(!format!("{config:?}").contains("secret"));
    }
}
