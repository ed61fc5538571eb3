use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub async fn health_check() -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    (StatusCode::OK, Json(ApiResponse::success(HealthResponse::new("healthy"))))
}

pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match state.menu_service.health_check().await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::success(HealthResponse::new("ready")))).into_response(),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            let body = ApiResponse::<()>::error("SERVICE_UNAVAILABLE", &e.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
