//! InsightEd RS Server
//!
//! HTTP server for the school-infrastructure project tracker.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use ie_advisory::{AdvisoryService, GeminiClient};
use ie_api::AppState;
use ie_core::config::{
    AppConfig, ConfigError, LogFormat, LoggingConfig, ServerConfig, StoreConfig,
};
use ie_store::{seed::load_seed_file, JsonFileProjectStore, MemoryProjectStore, ProjectRepository};

mod health;
mod metrics;

use health::{HealthChecker, HealthConfig, HealthState};
use metrics::Metrics;

/// Environment variable naming an optional config file
const CONFIG_PATH_VAR: &str = "INSIGHTED_CONFIG";
/// Environment variable naming the JSON record file
const STORE_PATH_VAR: &str = "STORE_PATH";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config_path = std::env::var(CONFIG_PATH_VAR).ok();
    let loaded = match &config_path {
        Some(path) => AppConfig::load(path),
        None => AppConfig::from_env(),
    };
    let store_requested = config_path.is_some() || std::env::var(STORE_PATH_VAR).is_ok();
    let (config, config_error) = resolve_config(loaded, store_requested)?;

    init_tracing(&config.logging);
    if let Some(e) = config_error {
        warn!("Failed to load config: {}, using defaults", e);
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "Starting InsightEd RS"
    );

    let (store, backend) = open_store(&config.store).await?;

    let advisory_key_configured = config
        .advisory
        .api_key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty());
    if !advisory_key_configured {
        warn!("No advisory API key configured; advisory endpoints will return fallback text");
    }
    let generator = GeminiClient::new(&config.advisory).context("Failed to build advisory client")?;
    let advisory = Arc::new(AdvisoryService::new(
        Arc::new(generator),
        Duration::from_secs(config.advisory.timeout_seconds),
    ));

    let metrics = Arc::new(Metrics::new());
    let health_checker = HealthChecker::new(HealthConfig::default(), store.clone())
        .with_store_backend(backend)
        .with_advisory_key(advisory_key_configured);
    let health_state = Arc::new(HealthState {
        health: Arc::new(health_checker),
    });

    let app = build_router(
        AppState::new(store, advisory),
        health_state,
        metrics,
        &config.server,
    );

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pick the configuration to start with
///
/// A load failure falls back to defaults (in-memory store, no API key) only
/// when no config file or store path was given. Otherwise starting would
/// silently drop the durable store, so startup fails instead.
fn resolve_config(
    loaded: Result<AppConfig, ConfigError>,
    store_requested: bool,
) -> anyhow::Result<(AppConfig, Option<ConfigError>)> {
    match loaded {
        Ok(config) => Ok((config, None)),
        Err(e) if store_requested => {
            Err(anyhow::Error::new(e).context("Failed to load configuration"))
        }
        Err(e) => Ok((AppConfig::default(), Some(e))),
    }
}

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let filter = logging
        .filter
        .as_deref()
        .and_then(|f| tracing_subscriber::EnvFilter::try_new(f).ok())
        .or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| "info,ie_server=debug,ie_api=debug,tower_http=debug".into());

    let fmt_layer = match logging.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Open the configured store and load seed records into it when it is empty
async fn open_store(
    config: &StoreConfig,
) -> anyhow::Result<(Arc<dyn ProjectRepository>, &'static str)> {
    let (store, backend): (Arc<dyn ProjectRepository>, _) = match &config.path {
        Some(path) => {
            let store = JsonFileProjectStore::open(path)
                .await
                .with_context(|| format!("Failed to open project store {}", path))?;
            (Arc::new(store), "json-file")
        }
        None => {
            info!("No store path configured; records are kept in memory");
            (Arc::new(MemoryProjectStore::new()), "memory")
        }
    };

    if let Some(seed_path) = &config.seed_path {
        let projects = load_seed_file(seed_path)
            .await
            .with_context(|| format!("Failed to load seed file {}", seed_path))?;
        let inserted = store.seed(projects).await?;
        info!(inserted, "Seeded project store");
    }

    Ok((store, backend))
}

/// Build the application router
fn build_router(
    api_state: AppState,
    health_state: Arc<HealthState>,
    metrics: Arc<Metrics>,
    server: &ServerConfig,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::liveness))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health_state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/metrics.json", get(metrics::json_metrics))
        .with_state(metrics.clone());

    Router::new()
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(ie_api::router().with_state(api_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_seconds,
                ))),
        )
        .layer(DefaultBodyLimit::max(server.max_body_size_bytes))
        .layer(middleware::from_fn_with_state(
            metrics,
            metrics::metrics_middleware,
        ))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
