//! Application startup and lifecycle management.

use crate::config::VerdictConfig;
use crate::handlers::{analyze, health_check, verdict};
use crate::services::providers::CompletionProvider;
use crate::services::providers::anthropic::{AnthropicConfig, AnthropicProvider};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Upper bound on a whole multipart body: the largest persona allows
/// 8 images at 10 MiB each, plus form overhead.
const MAX_BODY_BYTES: usize = 96 * 1024 * 1024;

/// Shared application state. Read-only after startup; requests share
/// nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: VerdictConfig,
    pub provider: Arc<dyn CompletionProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/:persona/analyze", post(analyze))
        .route("/api/:persona/verdict", post(verdict))
        .fallback_service(ServeDir::new("verdict-service/static"))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application against the real Anthropic endpoint.
    pub async fn build(config: VerdictConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn CompletionProvider> = Arc::new(AnthropicProvider::new(
            AnthropicConfig {
                api_key: config.anthropic.api_key.clone(),
                base_url: config.anthropic.base_url.clone(),
            },
        ));

        tracing::info!(
            analyze_model = %config.anthropic.analyze_model,
            verdict_model = %config.anthropic.verdict_model,
            "initialized Anthropic provider"
        );

        Self::with_provider(config, provider).await
    }

    /// Build with an injected provider (tests use the mock here).
    pub async fn with_provider(
        config: VerdictConfig,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state: AppState { config, provider },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run until shutdown is requested.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
