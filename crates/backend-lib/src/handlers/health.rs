// ============================
// crates/backend-lib/src/handlers/health.rs
// ============================
//! Health check and service info handlers.
use axum::Json;
use chrono::Utc;
use fundflow_common::{HealthResponse, ServiceInfo};

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "FundFlow API is running".to_string(),
        timestamp: Utc::now(),
    })
}

/// GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "FundFlow API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "RESTful API for the mutual funds platform".to_string(),
    })
}
