//! Application startup and lifecycle management.

use crate::config::{ShelterConfig, SiblingPorts};
use crate::dtos::{CreateAnimalRequest, CreatedResponse, ErrorResponse, SlowResponse};
use crate::handlers;
use crate::models::Animal;
use crate::services::{AnimalRepository, PgAnimalRepository, ShelterMetrics};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::animals::list_animals,
        handlers::animals::create_animal,
        handlers::slow::slow_endpoint,
    ),
    components(schemas(
        Animal,
        CreateAnimalRequest,
        CreatedResponse,
        SlowResponse,
        ErrorResponse
    )),
    tags(
        (name = "Animals", description = "Shelter animal records"),
        (name = "Debug", description = "Latency demonstration")
    ),
    info(title = "Shelter API")
)]
pub struct ApiDoc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service_name: String,
    pub port: u16,
    pub siblings: SiblingPorts,
    pub repository: Arc<dyn AnimalRepository>,
    pub metrics: ShelterMetrics,
}

/// Assemble every route with request counting and tracing layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/docs", get(handlers::docs))
        .route("/main", get(handlers::animals_table))
        .route("/animals", get(handlers::list_animals))
        .route("/api/animals", post(handlers::create_animal))
        .route("/slow", get(handlers::slow_endpoint))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .merge(SwaggerUi::new("/apidocs").url("/apispec.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(
            state.metrics.clone(),
            metrics_middleware::<ShelterMetrics>,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// The store is not contacted here; sessions are opened per request.
    pub async fn build(config: ShelterConfig) -> Result<Self, AppError> {
        let metrics = ShelterMetrics::new().map_err(|e| {
            tracing::error!(error = %e, "Failed to register metrics");
            AppError::InternalError(e.into())
        })?;

        let repository = PgAnimalRepository::new(config.database.connect_options()?);

        let addr: SocketAddr = format!("{}:{}", config.common.host, config.common.port)
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Invalid listen address {}:{}: {}",
                    config.common.host,
                    config.common.port,
                    e
                ))
            })?;

        // Port 0 binds a random port for tests.
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port, "Shelter service listener bound");

        let state = AppState {
            service_name: config.service_name.clone(),
            port,
            siblings: config.siblings,
            repository: Arc::new(repository),
            metrics,
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the metrics registry shared with the handlers.
    pub fn metrics(&self) -> &ShelterMetrics {
        &self.state.metrics
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!(
            service = "shelter-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await
    }
}
