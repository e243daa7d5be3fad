//! HTTP Server configuration and startup.

use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use axum::{Router, middleware, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use convert_types::RateProvider;

use super::cors::{CorsSettings, cors_layer};
use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, SWEEP_INTERVAL, rate_limit_middleware, spawn_sweeper};
use crate::ConversionService;

/// Tunables for the HTTP layer.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub body_limit: usize,
    /// `None` disables the per-request timeout.
    pub request_timeout: Option<Duration>,
    pub rate_limit_max_requests: NonZeroU32,
    pub rate_limit_window: Duration,
    pub cors: CorsSettings,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            body_limit: 10 * 1024,
            request_timeout: Some(Duration::from_secs(30)),
            rate_limit_max_requests: NonZeroU32::new(100).unwrap_or(NonZeroU32::MIN),
            rate_limit_window: Duration::from_secs(15 * 60),
            cors: CorsSettings::default(),
        }
    }
}

/// HTTP Server for the Currency Converter API.
pub struct HttpServer<P: RateProvider> {
    state: Arc<AppState<P>>,
    rate_limiter: Arc<RateLimiterState>,
    settings: HttpSettings,
}

impl<P: RateProvider> HttpServer<P> {
    /// Creates a new HTTP server with default settings.
    pub fn new(service: ConversionService<P>) -> Self {
        Self::with_settings(service, HttpSettings::default())
    }

    /// Creates a new HTTP server with custom settings.
    pub fn with_settings(service: ConversionService<P>, settings: HttpSettings) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            rate_limiter: Arc::new(RateLimiterState::new(
                settings.rate_limit_max_requests,
                settings.rate_limit_window,
            )),
            settings,
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/currencies", get(handlers::currencies))
            .route("/api/openapi.json", get(handlers::openapi_json))
            .route(
                "/api/convert",
                get(handlers::convert::<P>).fallback(handlers::method_not_allowed),
            )
            .fallback(handlers::not_found)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(RequestBodyLimitLayer::new(self.settings.body_limit))
            .layer(cors_layer(&self.settings.cors));

        let router = match self.settings.request_timeout {
            Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
            None => router,
        };

        router
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        let sweeper = spawn_sweeper(&self.rate_limiter, SWEEP_INTERVAL);

        let served = axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        sweeper.abort();
        served?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
