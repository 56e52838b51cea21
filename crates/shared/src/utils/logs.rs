use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber: pretty console output filtered by `RUST_LOG`,
/// an optional daily-rolling JSON file, and the OpenTelemetry log bridge.
///
/// The returned guard flushes the file writer on drop and must be held by `main`.
pub fn init_logger(
    sdk_logger_provider: SdkLoggerProvider,
    component: &str,
    is_dev: bool,
    enable_file: bool,
) -> Option<WorkerGuard> {
    let (file_layer, guard) = if enable_file {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let file_name = format!("rust_app_{component}.log");
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let default_console = if is_dev { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_console));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(is_dev)
        .with_filter(console_filter);

    let otel_filter =
        EnvFilter::new("info,hyper=off,h2=off,tonic=off,opentelemetry=off,reqwest=off");

    let otel_layer = OpenTelemetryTracingBridge::new(&sdk_logger_provider).with_filter(otel_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_hands_back_a_flush_guard() {
        let provider = SdkLoggerProvider::builder().build();

        let guard = init_logger(provider, "logs-test", true, true);

        assert!(guard.is_some());
        tracing::info!("file logger installed");
    }
}
