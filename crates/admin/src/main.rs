use admin::{config::Config, handler::AppRouter, state::AppState};
use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::utils::{Telemetry, init_logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("catalog-admin", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(
        telemetry.logger_provider().clone(),
        "catalog-admin",
        config.dev_mode,
        config.enable_file_log,
    );

    let port = config.port;

    let state = AppState::new(config.api)
        .await
        .context("Failed to create AppState")?;

    info!("Server started successfully");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    telemetry.shutdown()?;

    Ok(())
}
