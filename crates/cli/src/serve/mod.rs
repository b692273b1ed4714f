//! `activateflow serve` -- HTTP JSON API for funnel analytics.
//!
//! Exposes snapshot persistence and the recovery calculator as an async
//! HTTP service using `axum` + `tokio`. Requests are handled independently;
//! the only shared resource is the snapshot store, owned for the process
//! lifetime and released at shutdown.
//!
//! Endpoints:
//! - GET  /api/                    - API banner
//! - POST /api/funnel              - Persist a funnel snapshot
//! - GET  /api/funnel/latest       - Most recent snapshot, or null
//! - POST /api/recovery/calculate  - Recovery-lift estimate
//! - GET  /health                  - Server status
//!
//! Configuration comes from the environment:
//! - `ACTIVATEFLOW_DATA_DIR`     - sled database location
//! - `ACTIVATEFLOW_DB_NAME`      - snapshot collection (tree) name
//! - `ACTIVATEFLOW_CORS_ORIGINS` - comma-separated allowlist, `*` for any
//!
//! All responses use Content-Type: application/json.

mod handlers;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use activateflow_storage::{FunnelStore, MemoryStore, SledStore};

use self::handlers::{
    handle_api_root, handle_calculate_recovery, handle_health, handle_latest_funnel,
    handle_not_found, handle_submit_funnel,
};
use self::state::AppState;

/// Maximum request body size: 1 MiB. Funnel payloads are small.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Default sled database location.
const DEFAULT_DATA_DIR: &str = "activateflow-data";

/// Default snapshot collection (sled tree) name.
const DEFAULT_DB_NAME: &str = "funnel_data";

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Build the CORS layer from the `ACTIVATEFLOW_CORS_ORIGINS` allowlist.
///
/// `*`, an empty value, or an unset variable allow any origin, matching the
/// original deployment default.
fn cors_layer() -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let origins = std::env::var("ACTIVATEFLOW_CORS_ORIGINS").unwrap_or_default();
    if origins.trim().is_empty() || origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect();
    tracing::info!(origins = %origins, "CORS restricted to configured origins");
    layer.allow_origin(allowed)
}

/// Build the API router over the given store.
fn build_router(store: Arc<dyn FunnelStore>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/", get(handle_api_root))
        .route("/api/funnel", post(handle_submit_funnel))
        .route("/api/funnel/latest", get(handle_latest_funnel))
        .route("/api/recovery/calculate", post(handle_calculate_recovery))
        .fallback(handle_not_found)
        .layer(cors_layer())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state)
}

/// Start the HTTP server on the given port.
///
/// With `memory` set, snapshots live in process memory and vanish at exit;
/// otherwise they persist in the sled database named by the environment.
/// When TLS cert/key paths are provided, the server listens over HTTPS
/// using `axum-server` with rustls. Otherwise it uses plain HTTP.
pub async fn start_server(
    port: u16,
    memory: bool,
    _tls_cert: Option<PathBuf>,
    _tls_key: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store: Arc<dyn FunnelStore> = if memory {
        tracing::info!("using in-memory snapshot store");
        Arc::new(MemoryStore::new())
    } else {
        let data_dir = std::env::var("ACTIVATEFLOW_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let db_name =
            std::env::var("ACTIVATEFLOW_DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());
        tracing::info!(data_dir = %data_dir, collection = %db_name, "opening snapshot store");
        Arc::new(SledStore::open(&data_dir, &db_name)?)
    };

    let app = build_router(store);
    let addr = format!("0.0.0.0:{}", port);

    // TLS support via axum-server + rustls (requires `tls` feature)
    #[cfg(feature = "tls")]
    if let (Some(cert_path), Some(key_path)) = (&_tls_cert, &_tls_key) {
        let config =
            axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path).await?;
        let socket_addr: std::net::SocketAddr = addr.parse()?;
        tracing::info!("ActivateFlow API listening on https://0.0.0.0:{}", port);
        axum_server::bind_rustls(socket_addr, config)
            .serve(app.into_make_service())
            .await?;
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("ActivateFlow API listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("received shutdown signal");
}
