//! 网关错误与 JSON-RPC 错误码映射

use thiserror::Error;

use crate::application::ports::BackendError;
use crate::domain::mcp::{error_codes, JsonRpcError};

/// 网关分发错误
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Romanize backend error: {0}")]
    RomanizeBackend(#[from] BackendError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => error_codes::PARSE_ERROR,
            Self::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            Self::UnsupportedMethod(_) | Self::UnknownTool(_) => error_codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => error_codes::INVALID_PARAMS,
            Self::RomanizeBackend(_) | Self::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// 转换为 JSON-RPC 错误对象
    pub fn to_rpc_error(&self) -> JsonRpcError {
        match self {
            Self::Parse(detail) => JsonRpcError::new(self.code(), "Parse error").with_data(detail.clone()),
            Self::InvalidRequest(detail) => {
                JsonRpcError::new(self.code(), "Invalid Request").with_data(detail.clone())
            }
            Self::UnsupportedMethod(_) | Self::UnknownTool(_) => {
                JsonRpcError::new(self.code(), self.to_string())
            }
            Self::InvalidParams(detail) => {
                JsonRpcError::new(self.code(), "Invalid params").with_data(detail.clone())
            }
            Self::RomanizeBackend(e) => {
                JsonRpcError::new(self.code(), "Romanize backend error").with_data(e.to_string())
            }
            Self::Internal(detail) => {
                JsonRpcError::new(self.code(), "Internal error").with_data(detail.clone())
            }
        }
    }
}
