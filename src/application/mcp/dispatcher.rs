//! MCP 请求分发
//!
//! `initialize` / `tools/list` 本地应答，`tools/call` 按工具名前缀分派

use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::mcp::error::GatewayError;
use crate::application::mcp::tool_catalog::all_tools;
use crate::application::mcp::tts_links::{TtsEndpoint, TtsLinkBuilder};
use crate::application::ports::RomanizeBackendPort;
use crate::domain::mcp::{JsonRpcRequest, JsonRpcResponse, ToolCall, ToolFamily, ToolResult};

/// 协商的 MCP 协议版本
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// 对外公布的服务信息
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "voicegate-mcp-gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// MCP Dispatcher
pub struct McpDispatcher {
    romanizer: Arc<dyn RomanizeBackendPort>,
    links: TtsLinkBuilder,
    server: ServerInfo,
}

impl McpDispatcher {
    pub fn new(romanizer: Arc<dyn RomanizeBackendPort>, links: TtsLinkBuilder) -> Self {
        Self {
            romanizer,
            links,
            server: ServerInfo::default(),
        }
    }

    /// 分发一个请求
    ///
    /// 通知类消息返回 `None`，调用方不应写响应体
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.method.starts_with("notifications/") {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        tracing::info!(method = %request.method, id = ?request.id, "MCP request received");

        let id = request.id.clone();
        let response = match self.handle(&request).await {
            Ok(response) => response,
            Err(e) => {
                match &e {
                    GatewayError::RomanizeBackend(_) | GatewayError::Internal(_) => {
                        tracing::error!(method = %request.method, error = %e, "MCP request failed")
                    }
                    _ => tracing::warn!(method = %request.method, error = %e, "MCP request rejected"),
                }
                JsonRpcResponse::failure(id, e.to_rpc_error())
            }
        };
        Some(response)
    }

    async fn handle(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, GatewayError> {
        let id = request.id.clone();
        match request.method.as_str() {
            "initialize" => Ok(JsonRpcResponse::success(id, self.initialize_result())),
            "tools/list" => Ok(JsonRpcResponse::success(
                id,
                json!({ "tools": all_tools(self.links.default_voice()) }),
            )),
            "tools/call" => self.call_tool(request).await,
            other => Err(GatewayError::UnsupportedMethod(other.to_string())),
        }
    }

    async fn call_tool(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, GatewayError> {
        let call = ToolCall::from_params(request.params.as_ref()).map_err(GatewayError::InvalidParams)?;
        tracing::debug!(tool = %call.name, "Dispatching tool call");

        match call.family() {
            ToolFamily::Romanize => {
                let mut response = self.romanizer.call(request).await?;
                // 后端可能改写 id 类型，以调用方为准
                response.id = request.id.clone();
                Ok(response)
            }
            ToolFamily::Tts => {
                let endpoint = TtsEndpoint::from_tool(&call.name)
                    .ok_or_else(|| GatewayError::UnknownTool(call.name.clone()))?;
                let message = self.links.build_message(endpoint, &call)?;
                let result = serde_json::to_value(ToolResult::text(message))
                    .map_err(|e| GatewayError::Internal(e.to_string()))?;
                Ok(JsonRpcResponse::success(request.id.clone(), result))
            }
            ToolFamily::Unknown => Err(GatewayError::UnknownTool(call.name)),
        }
    }

    /// `initialize` 的结果
    pub fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.server.name,
                "version": self.server.version
            }
        })
    }

    /// GET 请求返回的发现文档
    pub fn describe(&self) -> Value {
        json!({
            "name": self.server.name,
            "version": self.server.version,
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "transport": "http",
            "endpoints": {
                "mcp": "/mcp",
                "jsonrpc": "/mcp/jsonrpc",
                "health": "/health"
            },
            "tools": all_tools(self.links.default_voice())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::SynthesisPolicy;
    use crate::application::ports::BackendError;
    use crate::domain::mcp::{error_codes, RequestId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 可预设应答的罗马字后端
    #[derive(Default)]
    struct StubRomanizer {
        reply: Option<Value>,
        seen: Mutex<Vec<JsonRpcRequest>>,
    }

    #[async_trait]
    impl RomanizeBackendPort for StubRomanizer {
        async fn call(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, BackendError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Some(value) => serde_json::from_value(value.clone())
                    .map_err(|e| BackendError::InvalidResponse(e.to_string())),
                None => Err(BackendError::NetworkError("connection refused".to_string())),
            }
        }
    }

    fn dispatcher(romanizer: Arc<StubRomanizer>) -> McpDispatcher {
        McpDispatcher::new(
            romanizer,
            TtsLinkBuilder::new("http://tts.local:8000", SynthesisPolicy::default()),
        )
    }

    fn tool_call(id: i64, name: &str, arguments: Value) -> JsonRpcRequest {
        let params = json!({"name": name, "arguments": arguments});
        JsonRpcRequest::new(RequestId::Number(id.into()), "tools/call")
            .with_params(params.as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn test_initialize() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(JsonRpcRequest::new(RequestId::Number(1.into()), "initialize"))
            .await
            .unwrap();
        let result = response.result().unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "voicegate-mcp-gateway");
    }

    #[tokio::test]
    async fn test_notification_has_no_response() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(JsonRpcRequest::new(None, "notifications/initialized"))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_with_dead_backend() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(JsonRpcRequest::new(RequestId::String("a".into()), "tools/list"))
            .await
            .unwrap();
        assert_eq!(response.id, Some(RequestId::String("a".into())));
        assert_eq!(response.result().unwrap()["tools"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d.dispatch(tool_call(2, "foo_bar", json!({}))).await.unwrap();
        let error = response.error().unwrap();
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Unknown tool: foo_bar");
    }

    #[tokio::test]
    async fn test_unknown_tts_tool() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d.dispatch(tool_call(2, "tts_sing", json!({"text": "hi"}))).await.unwrap();
        assert_eq!(response.error().unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(JsonRpcRequest::new(RequestId::Number(3.into()), "resources/list"))
            .await
            .unwrap();
        let error = response.error().unwrap();
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(error.message, "Unsupported method: resources/list");
    }

    #[tokio::test]
    async fn test_missing_tool_name() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let request = JsonRpcRequest::new(RequestId::Number(4.into()), "tools/call")
            .with_params(json!({"arguments": {}}).as_object().cloned().unwrap());
        let response = d.dispatch(request).await.unwrap();
        assert_eq!(response.error().unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_romanize_relayed_with_caller_id() {
        let romanizer = Arc::new(StubRomanizer {
            reply: Some(json!({
                "jsonrpc": "2.0",
                "id": "5",
                "result": {"content": [{"type": "text", "text": "annyeonghaseyo"}]}
            })),
            ..Default::default()
        });
        let d = dispatcher(romanizer.clone());
        let request = tool_call(5, "romanize_single", json!({"text": "안녕하세요"}));

        let response = d.dispatch(request.clone()).await.unwrap();
        assert_eq!(response.id, Some(RequestId::Number(5.into())));
        assert_eq!(
            response.result().unwrap()["content"][0]["text"],
            "annyeonghaseyo"
        );
        assert_eq!(romanizer.seen.lock().unwrap().as_slice(), &[request]);
    }

    #[tokio::test]
    async fn test_romanize_backend_failure() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(tool_call(6, "romanize_lyrics", json!({"text": "가사"})))
            .await
            .unwrap();
        let error = response.error().unwrap();
        assert_eq!(error.code, error_codes::INTERNAL_ERROR);
        assert_eq!(error.message, "Romanize backend error");
        assert_eq!(
            error.data,
            Some(Value::String("Network error: connection refused".into()))
        );
    }

    #[tokio::test]
    async fn test_tts_returns_link() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(tool_call(7, "tts_synthesize", json!({"text": "hi"})))
            .await
            .unwrap();
        let result = response.result().unwrap();
        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("http://tts.local:8000/api/v1/tts/synthesize?text=hi&voice=ko-KR-SunHiNeural"));
    }

    #[tokio::test]
    async fn test_tts_invalid_arguments() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let response = d
            .dispatch(tool_call(8, "tts_stream", json!({"text": "hi", "rate": "fast"})))
            .await
            .unwrap();
        assert_eq!(response.error().unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_describe() {
        let d = dispatcher(Arc::new(StubRomanizer::default()));
        let doc = d.describe();
        assert_eq!(doc["transport"], "http");
        assert_eq!(doc["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert_eq!(doc["tools"].as_array().unwrap().len(), 4);
    }
}
