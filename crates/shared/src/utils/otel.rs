use anyhow::{Context as _, Result};
use opentelemetry::{Context, global};
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider,
    propagation::TraceContextPropagator, trace::SdkTracerProvider,
};
use tokio::time::Instant;

/// Span context plus the instant the traced operation started.
pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// OTLP providers for traces, metrics and logs of one component.
pub struct Telemetry {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
    logger_provider: SdkLoggerProvider,
}

impl Telemetry {
    /// Builds the three exporters against `otel_endpoint` and installs the tracer
    /// and meter providers plus the W3C trace-context propagator globally.
    pub fn init(service_name: &str, otel_endpoint: &str) -> Result<Self> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let resource = Resource::builder()
            .with_service_name(service_name.to_string())
            .build();

        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create span exporter")?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(resource.clone())
            .with_batch_exporter(span_exporter)
            .build();

        global::set_tracer_provider(tracer_provider.clone());

        let metric_exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create metric exporter")?;

        let meter_provider = SdkMeterProvider::builder()
            .with_resource(resource.clone())
            .with_periodic_exporter(metric_exporter)
            .build();

        global::set_meter_provider(meter_provider.clone());

        let log_exporter = LogExporter::builder()
            .with_tonic()
            .with_endpoint(otel_endpoint)
            .build()
            .context("Failed to create log exporter")?;

        let logger_provider = SdkLoggerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(log_exporter)
            .build();

        Ok(Self {
            tracer_provider,
            meter_provider,
            logger_provider,
        })
    }

    pub fn logger_provider(&self) -> &SdkLoggerProvider {
        &self.logger_provider
    }

    pub fn shutdown(self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.tracer_provider.shutdown() {
            errors.push(format!("tracer provider: {e}"));
        }
        if let Err(e) = self.meter_provider.shutdown() {
            errors.push(format!("meter provider: {e}"));
        }
        if let Err(e) = self.logger_provider.shutdown() {
            errors.push(format!("logger provider: {e}"));
        }

        if !errors.is_empty() {
            anyhow::bail!("Failed to shutdown providers:\n{}", errors.join("\n"));
        }

        Ok(())
    }
}
