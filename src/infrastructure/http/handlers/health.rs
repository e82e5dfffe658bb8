//! Health Handlers

use axum::Json;

use crate::infrastructure::http::dto::HealthResponse;

pub const TTS_SERVICE_NAME: &str = "Edge TTS Server";
pub const GATEWAY_SERVICE_NAME: &str = "MCP Gateway";

/// TTS 服务健康检查（`/` 与 `/health`）
pub async fn tts_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: TTS_SERVICE_NAME,
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

/// 网关健康检查
pub async fn gateway_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: GATEWAY_SERVICE_NAME,
        version: None,
    })
}
