use crate::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

/// Catalog source configuration from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub api_url: String,
    pub file: Option<PathBuf>,
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Default product API endpoint
    pub const DEFAULT_API_URL: &'static str = "https://api.escuelajs.co/api/v1/products";

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Load configuration from environment variables
    /// Uses CATALOG_API_URL with default fallback
    /// Uses CATALOG_FILE to read products from a local JSON file instead of the API
    /// Uses CATALOG_TIMEOUT (seconds) with default fallback
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = match lookup("CATALOG_TIMEOUT") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| eyre!("CATALOG_TIMEOUT must be a number of seconds, got: {}", value))?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url: lookup("CATALOG_API_URL").unwrap_or_else(|| Self::DEFAULT_API_URL.to_string()),
            file: lookup("CATALOG_FILE").map(PathBuf::from),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        file: Option<PathBuf>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(path) = file {
            self.file = Some(path);
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}
