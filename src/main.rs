use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fleet_messaging_api::config;
use fleet_messaging_api::database::manager::DatabaseManager;
use fleet_messaging_api::handlers::messages;
use fleet_messaging_api::messaging::PgDirectory;
use fleet_messaging_api::middleware::jwt_auth_middleware;
use fleet_messaging_api::services::PgMessageStore;
use fleet_messaging_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Fleet Messaging API in {:?} mode", config.environment);

    let pool = DatabaseManager::pool()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    let state = AppState::new(
        Arc::new(PgDirectory::new(pool.clone())),
        Arc::new(PgMessageStore::new(pool)),
    );

    let app = app(state);

    // Allow deployments to override port via env
    let port = std::env::var("FLEET_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Fleet Messaging API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Protected messaging API
        .merge(message_routes(state))
        // Global middleware (the CORS layer also answers OPTIONS preflights)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn message_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(messages::send_post))
        .layer(axum::middleware::from_fn(jwt_auth_middleware))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Fleet Messaging API",
            "version": version,
            "description": "Recipient resolution, authorization and delivery for fleet platform messages",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "messages": "/api/messages (protected - POST, bearer token)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
