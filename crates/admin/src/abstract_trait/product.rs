use crate::domain::{requests::product::FormData, response::product::Product};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductStore = Arc<dyn ProductStoreTrait + Send + Sync>;

/// Remote product operations. Form-backed operations take the raw submitted
/// fields and coerce and validate them before anything is sent.
#[async_trait]
pub trait ProductStoreTrait {
    async fn create_product(&self, form: &FormData) -> Result<(), ServiceError>;
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    /// `Ok(None)` when the backend answers 404.
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError>;
    async fn update_product(&self, form: &FormData, id: i64) -> Result<(), ServiceError>;
    async fn delete_product(&self, id: i64) -> Result<(), ServiceError>;
    async fn update_availability(&self, id: i64) -> Result<(), ServiceError>;
}
