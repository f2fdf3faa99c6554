use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

/// Liveness payload served at `/`.
pub async fn home() -> Json<Value> {
    Json(json!({ "message": "DNA Hastalık Tahmin API çalışıyor!" }))
}

pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "health-risk-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
