//! Application startup and lifecycle management.

use crate::config::{GeneratorBackend, StoryConfig};
use crate::handlers;
use crate::services::providers::huggingface::{HuggingFaceConfig, HuggingFaceGenerator};
use crate::services::providers::mock::MockGenerator;
use crate::services::providers::{GenerationParams, TextGenerator};
use crate::services::{metrics, StoryService};
use axum::{
    http::{header, Method, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: StoryConfig,
    pub story_service: StoryService,
}

impl AppState {
    /// Wire the generator named in `config` into a ready-to-serve state.
    pub fn from_config(config: StoryConfig) -> Result<Self, AppError> {
        let generator = build_generator(&config)?;
        Ok(Self::with_generator(config, generator))
    }

    pub fn with_generator(config: StoryConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let params = GenerationParams {
            max_length: config.generator.max_length,
            num_return_sequences: config.generator.num_return_sequences,
            truncation: true,
        };
        let story_service = StoryService::new(
            generator,
            params,
            config.generator.model.clone(),
            config.prompts.seed,
        );

        Self {
            config,
            story_service,
        }
    }
}

/// Construct the configured text generator. Called once per process.
pub fn build_generator(config: &StoryConfig) -> Result<Arc<dyn TextGenerator>, AppError> {
    let generator: Arc<dyn TextGenerator> = match config.generator.backend {
        GeneratorBackend::HuggingFace => {
            let hf_config = HuggingFaceConfig {
                endpoint: config.generator.endpoint.clone(),
                model: config.generator.model.clone(),
                api_token: config.generator.api_token.clone(),
                timeout: Duration::from_secs(config.generator.timeout_secs),
            };
            let generator = HuggingFaceGenerator::new(hf_config)
                .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
            Arc::new(generator)
        }
        GeneratorBackend::Mock => Arc::new(MockGenerator::new(true)),
    };

    tracing::info!(
        generator = generator.name(),
        model = %config.generator.model,
        endpoint = %config.generator.endpoint,
        "Initialized text generator"
    );

    Ok(generator)
}

/// Build the HTTP router with all middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/generate_summaries", post(handlers::summaries::generate_summaries))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .with_state(state)
        .layer(from_fn(handlers::metrics::http_metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: StoryConfig) -> Result<Self, AppError> {
        metrics::init_metrics();

        let state = AppState::from_config(config.clone())?;

        // Port 0 picks a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, service = %config.service.name, "Story service listening");

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })?;

        tracing::info!("Service shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
