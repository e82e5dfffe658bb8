//! MCP HTTP Handlers
//!
//! 请求体按原始字节接收，以便区分 -32700 与 -32600

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::application::GatewayError;
use crate::domain::mcp::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use crate::infrastructure::http::state::GatewayState;

/// 解析请求体
fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, GatewayError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| GatewayError::Parse(e.to_string()))?;
    if !value.is_object() {
        return Err(GatewayError::InvalidRequest(
            "request must be a JSON object".to_string(),
        ));
    }
    let request: JsonRpcRequest =
        serde_json::from_value(value).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(GatewayError::InvalidRequest(format!(
            "unsupported jsonrpc version: {}",
            request.jsonrpc
        )));
    }
    Ok(request)
}

/// POST /mcp, POST /mcp/jsonrpc
pub async fn mcp_jsonrpc(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed MCP request");
            return Json(JsonRpcResponse::failure(None, e.to_rpc_error())).into_response();
        }
    };

    match state.dispatcher.dispatch(request).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// GET /mcp, GET /mcp/jsonrpc
pub async fn mcp_discovery(State(state): State<Arc<GatewayState>>) -> Json<Value> {
    Json(state.dispatcher.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_errors() {
        assert!(matches!(parse_request(b"{not json"), Err(GatewayError::Parse(_))));
        assert!(matches!(parse_request(b"[1,2]"), Err(GatewayError::InvalidRequest(_))));
        assert!(matches!(
            parse_request(br#"{"jsonrpc":"2.0","id":1}"#),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(matches!(
            parse_request(br#"{"jsonrpc":"1.0","id":1,"method":"tools/list"}"#),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert!(parse_request(br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).is_ok());
    }
}
