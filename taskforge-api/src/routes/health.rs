/// Service banner and health check
///
/// # Endpoints
///
/// - `GET /` - Service name and version (public)
/// - `GET /health` - Liveness plus database connectivity (public)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Root banner response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service name
    pub message: String,

    /// Application version
    pub version: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Root handler: service name and version
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Taskforge API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check handler
///
/// Returns `healthy` with a connected database, `degraded` otherwise; the
/// endpoint itself never fails.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Ok(Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    }))
}
