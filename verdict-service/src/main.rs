use service_core::observability::init_tracing;
use verdict_service::config::VerdictConfig;
use verdict_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = VerdictConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing("verdict-service", &config.common.log_level);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("verdict-service listening on port {}", app.port());
    app.run_until_stopped().await
}
