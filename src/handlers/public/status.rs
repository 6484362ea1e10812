// handlers/public/status.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "status": "success",
        "message": "success get data",
        "data": {
            "name": "Merchant API",
            "version": version,
            "endpoints": {
                "login": "POST /api/login (public)",
                "register": "POST /api/users (public)",
                "users": "/api/users[/:id] (protected)",
                "merchants": "/api/merchants[/:id] (protected)",
                "outlets": "/api/outlets[/:id] (protected)",
                "products": "/api/products[/:id], /api/products/image (protected)",
            }
        }
    }))
}

/// Pings the store; 503 when it does not answer.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.repos.users.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "success get data",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("database unavailable").into_response()
        }
    }
}
