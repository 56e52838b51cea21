use anyhow::{Context, Result, anyhow};
use std::time::Duration;

const DEFAULT_OTEL_ENDPOINT: &str = "http://otel-collector:4317";

/// Backend location and client limits handed to the remote product store.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(3),
        }
    }

    pub fn products_url(&self) -> String {
        format!("{}/api/products", self.base_url)
    }

    pub fn product_url(&self, id: i64) -> String {
        format!("{}/api/products/{id}", self.base_url)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api: ApiConfig,
    pub otel_endpoint: String,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        let api_url = std::env::var("API_URL").context("Missing environment variable: API_URL")?;
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(anyhow!(
                "API_URL must start with http:// or https://, got '{api_url}'"
            ));
        }

        let port = std::env::var("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let request_timeout = optional_secs("REQUEST_TIMEOUT_SECS", 10)?;
        let connect_timeout = optional_secs("CONNECT_TIMEOUT_SECS", 3)?;

        let otel_endpoint =
            std::env::var("OTEL_ENDPOINT").unwrap_or_else(|_| DEFAULT_OTEL_ENDPOINT.to_string());

        Ok(Self {
            port,
            api: ApiConfig {
                request_timeout,
                connect_timeout,
                ..ApiConfig::new(api_url)
            },
            otel_endpoint,
            dev_mode: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }
}

fn optional_secs(key: &str, default: u64) -> Result<Duration> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .with_context(|| format!("{key} must be a whole number of seconds")),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

fn flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}
