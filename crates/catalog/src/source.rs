//! Product source: the single read that fills a session's catalog
//!
//! A failed read is never fatal. [`load_catalog`] logs the failure and hands
//! back an empty catalog, which the listing shows as "no products".

use crate::config::CatalogConfig;
use crate::prelude::*;
use catalog_core::product::{parse_products, Product};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum ProductSource {
    /// `GET` a JSON array of products
    Http { url: String, timeout: Duration },
    /// Read a JSON array of products from disk
    File(PathBuf),
}

impl ProductSource {
    /// A configured file takes precedence over the API
    pub fn from_config(config: &CatalogConfig) -> Self {
        match &config.file {
            Some(path) => ProductSource::File(path.clone()),
            None => ProductSource::Http {
                url: config.api_url.clone(),
                timeout: config.timeout,
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ProductSource::Http { url, .. } => url.clone(),
            ProductSource::File(path) => path.display().to_string(),
        }
    }

    /// Read the full product list
    pub async fn fetch(&self) -> std::result::Result<Vec<Product>, Error> {
        match self {
            ProductSource::Http { url, timeout } => fetch_http(url, *timeout).await,
            ProductSource::File(path) => fetch_file(path).await,
        }
    }
}

async fn fetch_http(url: &str, timeout: Duration) -> std::result::Result<Vec<Product>, Error> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::SourceUnavailable(f!("Failed to build HTTP client: {}", e)))?;

    log::debug!("GET {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::SourceUnavailable(f!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::SourceUnavailable(f!(
            "Failed to fetch {}: HTTP {}",
            url,
            response.status()
        )));
    }

    response
        .json::<Vec<Product>>()
        .await
        .map_err(|e| Error::SourceUnavailable(f!("Failed to parse products from {}: {}", url, e)))
}

async fn fetch_file(path: &Path) -> std::result::Result<Vec<Product>, Error> {
    log::debug!("Reading products from {}", path.display());
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::SourceUnavailable(f!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_products(&content).map_err(|e| {
        Error::SourceUnavailable(f!("Failed to parse products from {}: {}", path.display(), e))
    })
}

/// Load the catalog, falling back to an empty one when the source fails
///
/// The failure goes to the operator log only; there is no retry.
pub async fn load_catalog(source: &ProductSource, spinner: Option<&ProgressBar>) -> Vec<Product> {
    if let Some(s) = spinner {
        s.set_message(f!("Loading products from {}...", source.describe()));
    }

    match source.fetch().await {
        Ok(products) => {
            log::debug!("Loaded {} products", products.len());
            products
        }
        Err(err) => {
            log::error!("{}", err);
            Vec::new()
        }
    }
}
