pub mod modules;
mod schema;
pub mod shared;
pub mod state;

use std::time::Duration;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use modules::catalog::CatalogCacheStats;
use modules::{reviews, tv_progress};
use shared::http::USER_ID_HEADER;
use shared::infrastructure::database::PoolStatus;
use shared::{AppConfig, AppError, AppResult, Database};
use state::AppState;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PoolStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_cache: Option<CatalogCacheStats>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .merge(tv_progress::routes::router())
        .merge(reviews::routes::router())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: state.database.as_ref().map(|db| db.pool_status()),
        catalog_cache: state.catalog_cache.as_ref().map(|cache| cache.cache_stats()),
    })
}

/// Connect, migrate and serve until ctrl-c or SIGTERM
pub async fn serve(config: AppConfig) -> AppResult<()> {
    log_info!("Connecting to database...");
    let database = Arc::new(Database::connect(&config.database_url)?);
    database.run_migrations()?;

    let state = AppState::from_config(&config, database)?;
    let app = build_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind {}: {}", address, e)))?;
    log_info!("watchlog listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))?;

    log_info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        log_info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                log_info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log_error!("Failed to install SIGTERM handler: {}", e);
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
}
