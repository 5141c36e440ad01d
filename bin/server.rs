// Wealth Compass - Web Server
// Read-only JSON API over the snapshot. Every request recomputes the
// snapshot from the current store contents; overlapping requests are
// independent and the client keeps the latest one (the snapshot carries
// its own timestamp and input fingerprint).

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use wealth_compass::{snapshot_from_store, SqliteStore, StorageKeys, VERSION};

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<SqliteStore>>,
    keys: Arc<StorageKeys>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: VERSION,
    }))
}

/// GET /api/snapshot - Full financial snapshot, recomputed from the store
async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.lock().unwrap();
    let snapshot = snapshot_from_store(&*store, &state.keys);
    Json(ApiResponse::ok(snapshot))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Wealth Compass - Snapshot API");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path =
        std::env::var("COMPASS_DB").unwrap_or_else(|_| "compass.db".to_string());
    let store = SqliteStore::open(&db_path).expect("Failed to open store");
    println!("✓ Store opened: {}", db_path);

    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        keys: Arc::new(StorageKeys::default()),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/snapshot", get(get_snapshot))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/snapshot");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
