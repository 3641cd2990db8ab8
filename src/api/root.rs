use axum::Json;
use serde_json::json;

/// GET / - liveness probe.
pub async fn service_status() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
