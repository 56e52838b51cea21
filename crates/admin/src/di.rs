use anyhow::Result;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::product::DynProductStore, config::ApiConfig, controller::ProductController,
    service::{ProductStoreService, build_http_client},
};
use shared::utils::Metrics;

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_controller: ProductController,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_controller", &"ProductController")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(
        api: ApiConfig,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Result<Self> {
        let client = build_http_client(&api)?;

        let product_store: DynProductStore =
            Arc::new(ProductStoreService::new(client, api, metrics, registry).await);

        Ok(Self::with_store(product_store))
    }

    /// Wires the controller around an already built store.
    pub fn with_store(product_store: DynProductStore) -> Self {
        Self {
            product_controller: ProductController::new(product_store),
        }
    }
}
