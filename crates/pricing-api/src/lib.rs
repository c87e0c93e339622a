//! House Price Estimation Service
//!
//! HTTP front end over the feature pipeline and the loaded price model.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use feature_engine::{FeatureAssembler, SchemaCatalog};
use inference_engine::{load_model, PriceEngine};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub mod error;
pub mod rate_limit;
mod routes;
pub mod settings;

pub use error::{ApiError, StartupError};
pub use rate_limit::RateLimitConfig;
pub use settings::Settings;

/// Counter of prediction requests, labelled by outcome
pub const PREDICTIONS_TOTAL: &str = "house_price_predictions_total";
/// Histogram of prediction latency
pub const PREDICTION_SECONDS: &str = "house_price_prediction_seconds";

/// Application state shared read-only across handlers
pub struct AppState {
    /// Feature pipeline and model
    pub engine: PriceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus exporter, when installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: PriceEngine) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Build the schema catalog, load the model and wire the price engine.
///
/// A model that cannot be loaded is fatal; no state is produced without one.
pub fn build_state(settings: &Settings) -> Result<AppState, StartupError> {
    let catalog = Arc::new(SchemaCatalog::reference()?);
    let model = load_model(&settings.model.path, &catalog)?;
    let assembler = FeatureAssembler::new(catalog, settings.reference_year());
    let engine = PriceEngine::new(assembler, model).with_band_fraction(settings.pricing.band_fraction);
    Ok(AppState::new(engine))
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: String,
    pub reference_year: i64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, limits: Option<&RateLimitConfig>) -> Router {
    let mut predictions =
        Router::new().route("/api/v1/predictions", post(routes::predictions::create_prediction));

    if let Some(config) = limits.and_then(rate_limit::create_governor_config) {
        info!("Rate limiting predictions");
        predictions = predictions.layer(GovernorLayer { config });
    }

    Router::new()
        .route("/", get(routes::form::index))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/options", get(routes::options::get_options))
        .route("/metrics", get(metrics_handler))
        .merge(predictions)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.engine.model_name().to_string(),
        reference_year: state.engine.assembler().reference_year(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Initialize logging
pub fn init_logging(settings: &settings::LoggingSettings) -> Result<(), StartupError> {
    let level: Level = settings
        .level
        .parse()
        .map_err(|_| StartupError::Logging(format!("unknown log level '{}'", settings.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}

/// Run the server
pub async fn run_server(state: AppState, settings: &Settings) -> Result<(), StartupError> {
    let state = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => state.with_metrics(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable: {}", e);
            state
        }
    };

    let app = create_router(Arc::new(state), Some(&settings.rate_limit));

    info!("Starting API server on {}", settings.server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
