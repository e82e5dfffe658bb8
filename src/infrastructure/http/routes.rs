//! HTTP Routes
//!
//! tts-server:
//! - /api/v1/tts/synthesize                         GET|POST  合成并下载 MP3
//! - /api/v1/tts/stream                             GET|POST  合成并在线播放
//! - /api/v1/voices/voices                          GET       音色目录
//! - /api/v1/voices/voices/:voice_name/validate     GET       音色名称校验
//! - /, /health                                     GET       健康检查
//!
//! mcp-gateway:
//! - /mcp, /mcp/jsonrpc                             POST      JSON-RPC 分发
//! - /mcp, /mcp/jsonrpc                             GET       发现文档
//! - /health                                        GET       健康检查

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::{GatewayState, TtsState};

/// TTS 服务路由
pub fn create_tts_routes() -> Router<Arc<TtsState>> {
    Router::new()
        .route("/", get(handlers::tts_health))
        .route("/health", get(handlers::tts_health))
        .nest("/api/v1", tts_api_routes())
}

fn tts_api_routes() -> Router<Arc<TtsState>> {
    Router::new()
        .nest("/tts", synthesis_routes())
        .nest("/voices", voice_routes())
}

/// Synthesis 路由
fn synthesis_routes() -> Router<Arc<TtsState>> {
    Router::new()
        .route(
            "/synthesize",
            get(handlers::synthesize_query).post(handlers::synthesize_json),
        )
        .route(
            "/stream",
            get(handlers::stream_query).post(handlers::stream_json),
        )
}

/// Voice 路由
fn voice_routes() -> Router<Arc<TtsState>> {
    Router::new()
        .route("/voices", get(handlers::list_voices))
        .route("/voices/:voice_name/validate", get(handlers::validate_voice))
}

/// MCP 网关路由
pub fn create_gateway_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(handlers::gateway_health))
        .route(
            "/mcp",
            get(handlers::mcp_discovery).post(handlers::mcp_jsonrpc),
        )
        .route(
            "/mcp/jsonrpc",
            get(handlers::mcp_discovery).post(handlers::mcp_jsonrpc),
        )
}

/// 装配 TTS 服务
pub fn tts_app(state: TtsState) -> Router {
    create_tts_routes().with_state(Arc::new(state))
}

/// 装配 MCP 网关
pub fn gateway_app(state: GatewayState) -> Router {
    create_gateway_routes().with_state(Arc::new(state))
}
