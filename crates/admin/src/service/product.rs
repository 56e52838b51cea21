use crate::{
    abstract_trait::product::ProductStoreTrait,
    config::ApiConfig,
    domain::{
        requests::product::{DraftProduct, FormData, UpdateProduct},
        response::{api::ApiResponse, product::Product},
    },
    schema::{Schema, coerce, parse_list},
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use reqwest::{Client, Response, StatusCode, header::HeaderMap};
use shared::{
    errors::ServiceError,
    utils::{HeaderInjector, Method, Metrics, Status as StatusUtils, TracingContext},
};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

/// Talks to the product REST backend. Every outgoing payload and every incoming
/// `data` field is checked against the product shapes before it is trusted.
#[derive(Debug, Clone)]
pub struct ProductStoreService {
    client: Client,
    api: ApiConfig,
    metrics: Arc<Mutex<Metrics>>,
}

impl ProductStoreService {
    pub async fn new(
        client: Client,
        api: ApiConfig,
        metrics: Arc<Mutex<Metrics>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        registry.lock().await.register(
            "product_store_request_counter",
            "Total number of requests sent to the product backend",
            metrics.lock().await.request_counter.clone(),
        );
        registry.lock().await.register(
            "product_store_request_duration",
            "Histogram of product backend request durations",
            metrics.lock().await.request_duration.clone(),
        );
        Self {
            client,
            api,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-store")
    }

    fn trace_headers(&self, cx: &Context) -> HeaderMap {
        let mut headers = HeaderMap::new();
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(cx, &mut HeaderInjector(&mut headers))
        });
        headers
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Client)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    /// Closes the span, records metrics and logs the outcome. Failures are logged
    /// here and then handed back to the caller.
    async fn complete_tracing<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, ServiceError>,
        success_message: &str,
    ) -> Result<T, ServiceError> {
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();
        let (status, status_str, message) = match &result {
            Ok(_) => (StatusUtils::Success, "SUCCESS", success_message.to_string()),
            Err(err) => (StatusUtils::Error, "ERROR", err.to_string()),
        };

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.clone()),
            ],
        );

        if result.is_ok() {
            info!("Operation completed successfully: {message}");
        } else {
            error!("Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();

        result
    }

    async fn read_data(response: Response) -> Result<serde_json::Value, ServiceError> {
        let envelope = response.json::<ApiResponse>().await.map_err(|e| {
            ServiceError::Validation(vec![format!(
                "<root>: expected JSON envelope, received {e}"
            )])
        })?;
        Ok(envelope.data)
    }

    async fn fetch_products(&self, cx: &Context) -> Result<Vec<Product>, ServiceError> {
        let response = self
            .client
            .get(self.api.products_url())
            .headers(self.trace_headers(cx))
            .send()
            .await?
            .error_for_status()?;

        let data = Self::read_data(response).await?;
        Ok(parse_list::<Product>(&data)?)
    }

    async fn fetch_product(&self, cx: &Context, id: i64) -> Result<Option<Product>, ServiceError> {
        let response = self
            .client
            .get(self.api.product_url(id))
            .headers(self.trace_headers(cx))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let data = Self::read_data(response.error_for_status()?).await?;
        Ok(Some(Product::parse(&data)?))
    }

    async fn send_draft(&self, cx: &Context, form: &FormData) -> Result<(), ServiceError> {
        let draft = DraftProduct::parse(&coerce::draft_payload(form))?;

        self.client
            .post(self.api.products_url())
            .headers(self.trace_headers(cx))
            .json(&draft)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn send_product(&self, cx: &Context, form: &FormData, id: i64) -> Result<(), ServiceError> {
        let product = UpdateProduct::parse(&coerce::product_payload(form, id))?;

        self.client
            .put(self.api.product_url(id))
            .headers(self.trace_headers(cx))
            .json(&product)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn send_without_body(
        &self,
        cx: &Context,
        method: reqwest::Method,
        id: i64,
    ) -> Result<(), ServiceError> {
        self.client
            .request(method, self.api.product_url(id))
            .headers(self.trace_headers(cx))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[async_trait]
impl ProductStoreTrait for ProductStoreService {
    async fn create_product(&self, form: &FormData) -> Result<(), ServiceError> {
        info!("Creating product {:?}", form.get("name"));

        let tracing_ctx = self.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
            ],
        );

        let result = self.send_draft(&tracing_ctx.cx, form).await;

        self.complete_tracing(&tracing_ctx, Method::Post, result, "Product created")
            .await
    }

    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        info!("Retrieving all products");

        let tracing_ctx = self.start_tracing(
            "FindAllProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let result = self.fetch_products(&tracing_ctx.cx).await;

        if let Ok(products) = &result {
            info!("Successfully fetched {} products", products.len());
        }

        self.complete_tracing(&tracing_ctx, Method::Get, result, "Fetched all products")
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        info!("Retrieving product {id}");

        let tracing_ctx = self.start_tracing(
            "FindByIdProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product_id", id),
            ],
        );

        let result = self.fetch_product(&tracing_ctx.cx, id).await;

        if let Ok(None) = &result {
            info!("Product {id} not found");
        }

        self.complete_tracing(&tracing_ctx, Method::Get, result, "Fetched product")
            .await
    }

    async fn update_product(&self, form: &FormData, id: i64) -> Result<(), ServiceError> {
        info!("Updating product {id}");

        let tracing_ctx = self.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product_id", id),
            ],
        );

        let result = self.send_product(&tracing_ctx.cx, form, id).await;

        self.complete_tracing(&tracing_ctx, Method::Put, result, "Product updated")
            .await
    }

    async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        info!("Deleting product {id}");

        let tracing_ctx = self.start_tracing(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product_id", id),
            ],
        );

        let result = self
            .send_without_body(&tracing_ctx.cx, reqwest::Method::DELETE, id)
            .await;

        self.complete_tracing(&tracing_ctx, Method::Delete, result, "Product deleted")
            .await
    }

    async fn update_availability(&self, id: i64) -> Result<(), ServiceError> {
        info!("Toggling availability of product {id}");

        let tracing_ctx = self.start_tracing(
            "UpdateProductAvailability",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update_availability"),
                KeyValue::new("product_id", id),
            ],
        );

        let result = self
            .send_without_body(&tracing_ctx.cx, reqwest::Method::PATCH, id)
            .await;

        self.complete_tracing(
            &tracing_ctx,
            Method::Patch,
            result,
            "Product availability toggled",
        )
        .await
    }
}
