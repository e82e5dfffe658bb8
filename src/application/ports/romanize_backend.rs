//! Romanize Backend Port - 罗马字转换后端
//!
//! 后端自身就是 JSON-RPC 服务，网关只负责原样转发信封

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mcp::{JsonRpcRequest, JsonRpcResponse};

/// 后端调用错误
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait RomanizeBackendPort: Send + Sync {
    /// 转发一个 JSON-RPC 请求并返回后端的响应
    async fn call(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, BackendError>;
}
