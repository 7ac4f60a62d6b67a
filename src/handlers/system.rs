use axum::{http::Uri, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Profile API",
            "version": version,
            "description": "Personal, bank and tax profile data behind one validated endpoint",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "me": "GET /api/me, PUT /api/me (partial profile)",
            },
            "sections": ["bankDetail", "tax", "insurance"],
        }
    }))
}

/// GET /health - liveness
pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
