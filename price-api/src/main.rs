//! House Price Prediction Server
//!
//! Serves a house price model over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PRICE API                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │  Router   │→ │ PredictionAdapter│→ │  Model          │  │
//! │  │  (Axum)   │  │ (schema, scaler) │  │  (dense / onnx) │  │
//! │  └───────────┘  └──────────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

#[cfg(test)]
mod tests;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use price_core::constants::{APP_NAME, APP_VERSION};
use price_core::logic::artifact::load_scaler;
use price_core::{load_model, PredictionAdapter};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config)?;

    tracing::info!("{} v{} starting...", APP_NAME, APP_VERSION);
    tracing::info!("Environment: {}", config.environment);

    // Model is loaded once; a missing or broken artifact stops startup
    let model = load_model(&config.model_path).map_err(|e| {
        tracing::error!("Failed to load model {}: {}", config.model_path.display(), e);
        e
    })?;

    let mut adapter = PredictionAdapter::new(model);
    if let Some(path) = &config.scaler_path {
        let scaler = load_scaler(path).with_context(|| format!("loading scaler {}", path.display()))?;
        adapter = adapter.with_scaler(scaler)?;
        tracing::info!("Input normalization enabled");
    }

    // Build application state
    let state = AppState {
        adapter: Arc::new(adapter),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Console output plus an optional plain-text file
fn init_tracing(config: &config::Config) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "price_api=debug,price_core=info,tower_http=debug".into());

    let json_layer = config.json_logs().then(|| fmt::layer().json());
    let pretty_layer = (!config.json_logs()).then(|| fmt::layer());

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer)
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<PredictionAdapter>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Routes existing clients call
    let legacy_routes = Router::new()
        .route("/", get(handlers::health::ready))
        .route("/predict", post(handlers::predict::predict));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/predict", post(handlers::predict::predict_v1))
        .route("/api/v1/schema", get(handlers::schema::get))
        .route("/api/v1/status", get(handlers::status::get));

    // Combine all routes
    Router::new()
        .merge(legacy_routes)
        .merge(api_routes)
        .fallback(handlers::status::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
