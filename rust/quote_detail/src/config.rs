// src/config.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::error::QuoteError;

pub const DEFAULT_BASE_URL: &str = "http://192.168.1.72:5001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "QUOTE_SERVICE_URL";
pub const ENV_CATALOG_PATH: &str = "QUOTE_CATALOG_PATH";
pub const ENV_TIMEOUT_SECS: &str = "QUOTE_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub catalog_path: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_path: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, QuoteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Split out so tests don't have to touch the real environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuoteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(path) = lookup(ENV_CATALOG_PATH) {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                QuoteError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        config.validate()
    }

    /// Applies command-line values on top of this config and re-validates.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        catalog_path: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, QuoteError> {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(path) = catalog_path {
            self.catalog_path = Some(path);
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        self.validate()
    }

    pub fn validate(mut self) -> Result<Self, QuoteError> {
        let url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(QuoteError::Config(format!("base url must be http(s): {:?}", self.base_url)));
        }
        if self.request_timeout.is_zero() {
            return Err(QuoteError::Config("request timeout must be positive".to_string()));
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn load_catalog(&self) -> Result<Catalog, QuoteError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_path(path),
            None => Catalog::embedded(),
        }
    }
}
