#![allow(dead_code)]

use admin::{
    abstract_trait::product::ProductStoreTrait,
    config::ApiConfig,
    domain::{requests::product::FormData, response::product::Product},
    service::ProductStoreService,
};
use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use prometheus_client::registry::Registry;
use serde_json::{Value, json};
use shared::{errors::ServiceError, utils::Metrics};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct BackendState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    products: Arc<Vec<Value>>,
    fail_with: Option<StatusCode>,
}

/// In-process stand-in for the product REST API.
pub struct FakeBackend {
    pub base_url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeBackend {
    pub async fn start(products: Vec<Value>) -> Self {
        Self::spawn(products, None).await
    }

    pub async fn failing(status: StatusCode) -> Self {
        Self::spawn(Vec::new(), Some(status)).await
    }

    async fn spawn(products: Vec<Value>, fail_with: Option<StatusCode>) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            calls: calls.clone(),
            products: Arc::new(products),
            fail_with,
        };

        let app = Router::new().fallback(handle).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_with(&self, method: Method) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub async fn store(&self) -> ProductStoreService {
        store_for(&self.base_url).await
    }
}

pub async fn store_for(base_url: &str) -> ProductStoreService {
    ProductStoreService::new(
        reqwest::Client::new(),
        ApiConfig::new(base_url),
        Arc::new(tokio::sync::Mutex::new(Metrics::new())),
        Arc::new(tokio::sync::Mutex::new(Registry::default())),
    )
    .await
}

async fn handle(
    State(state): State<BackendState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        body: body.clone(),
    });

    if let Some(status) = state.fail_with {
        return status.into_response();
    }

    let id = path
        .strip_prefix("/api/products/")
        .and_then(|raw| raw.parse::<i64>().ok());

    match (method, id) {
        (Method::GET, None) => Json(json!({ "data": state.products.as_slice() })).into_response(),
        (Method::GET, Some(id)) => match state
            .products
            .iter()
            .find(|p| p.get("id").and_then(Value::as_i64) == Some(id))
        {
            Some(product) => Json(json!({ "data": product })).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        (Method::POST, None) => (StatusCode::CREATED, Json(json!({ "data": body }))).into_response(),
        (Method::PUT, Some(_)) | (Method::PATCH, Some(_)) => {
            Json(json!({ "data": body })).into_response()
        }
        (Method::DELETE, Some(_)) => Json(json!({ "data": "Producto eliminado" })).into_response(),
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

pub fn product_json(id: i64, name: &str, price: f64, availability: bool) -> Value {
    json!({ "id": id, "name": name, "price": price, "availability": availability })
}

pub fn form(fields: &[(&str, &str)]) -> FormData {
    fields.iter().copied().collect()
}

/// A call the controller made on the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Create(FormData),
    FindAll,
    FindById(i64),
    Update(i64, FormData),
    Delete(i64),
    UpdateAvailability(i64),
}

/// In-memory store that records every call and answers from a fixed list.
#[derive(Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<StoreCall>>,
    products: Vec<Product>,
    fail: bool,
}

impl RecordingStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(ServiceError::Transport("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductStoreTrait for RecordingStore {
    async fn create_product(&self, form: &FormData) -> Result<(), ServiceError> {
        self.record(StoreCall::Create(form.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        self.record(StoreCall::FindAll)?;
        Ok(self.products.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        self.record(StoreCall::FindById(id))?;
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn update_product(&self, form: &FormData, id: i64) -> Result<(), ServiceError> {
        self.record(StoreCall::Update(id, form.clone()))
    }

    async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        self.record(StoreCall::Delete(id))
    }

    async fn update_availability(&self, id: i64) -> Result<(), ServiceError> {
        self.record(StoreCall::UpdateAvailability(id))
    }
}
