use service_core::observability::init_tracing;
use story_service::config::StoryConfig;
use story_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = StoryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        &config.service.name,
        &config.service.log_level,
        &config.service.otlp_endpoint,
    );

    tracing::info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.generator.backend,
        "Starting story service"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
