mod product;

pub use self::product::ProductStoreService;

use crate::config::ApiConfig;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Shared connection pool for every call to the product backend.
pub fn build_http_client(api: &ApiConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(api.connect_timeout)
        .timeout(api.request_timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(30))
        .user_agent(concat!("catalog-admin/", env!("CARGO_PKG_VERSION")))
        .build()
        .with_context(|| format!("Failed to build HTTP client for {}", api.base_url))
}
