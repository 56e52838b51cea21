use crate::{abstract_trait::product::DynProductStore, config::ApiConfig, di::DependenciesInject};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::utils::{Metrics, SystemMetrics, run_metrics_collector};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl AppState {
    pub async fn new(api: ApiConfig) -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Arc::new(Mutex::new(Metrics::new()));
        let system_metrics = Arc::new(SystemMetrics::new());

        info!("Connecting product store to {}", api.base_url);

        let di_container = DependenciesInject::new(api, metrics, registry.clone())
            .await
            .context("Failed to initialize dependency injection container")?;

        system_metrics.register(&mut *registry.lock().await);

        tokio::spawn(run_metrics_collector(system_metrics));

        Ok(Self {
            di_container,
            registry,
        })
    }

    /// State around a caller-provided store, without the background collector.
    pub fn with_store(product_store: DynProductStore) -> Self {
        Self {
            di_container: DependenciesInject::with_store(product_store),
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }
}
