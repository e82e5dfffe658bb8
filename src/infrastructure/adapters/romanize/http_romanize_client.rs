//! HTTP Romanize Client - 调用罗马字转换服务
//!
//! 实现 RomanizeBackendPort trait，把 JSON-RPC 信封原样 POST 到后端
//!
//! 后端 API:
//! POST http://romanize-service:8080/mcp/jsonrpc
//! Request/Response: JSON-RPC 2.0

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{BackendError, RomanizeBackendPort};
use crate::domain::mcp::{JsonRpcRequest, JsonRpcResponse};

/// HTTP Romanize 客户端配置
#[derive(Debug, Clone)]
pub struct HttpRomanizeClientConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpRomanizeClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://romanize-service:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpRomanizeClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Romanize 客户端
pub struct HttpRomanizeClient {
    client: Client,
    config: HttpRomanizeClientConfig,
}

impl HttpRomanizeClient {
    pub fn new(config: HttpRomanizeClientConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn jsonrpc_url(&self) -> String {
        format!("{}/mcp/jsonrpc", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RomanizeBackendPort for HttpRomanizeClient {
    async fn call(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse, BackendError> {
        tracing::debug!(
            url = %self.jsonrpc_url(),
            method = %request.method,
            "Forwarding request to romanize backend"
        );

        let response = self
            .client
            .post(self.jsonrpc_url())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else if e.is_connect() {
                    BackendError::NetworkError(format!("Cannot connect to romanize service: {}", e))
                } else {
                    BackendError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to read body: {}", e)))?;
        let rpc_response: JsonRpcResponse = serde_json::from_slice(&body)
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        tracing::info!(
            method = %request.method,
            is_error = rpc_response.error().is_some(),
            "Romanize backend responded"
        );
        Ok(rpc_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mcp::RequestId;
    use serde_json::json;

    fn romanize_request() -> JsonRpcRequest {
        JsonRpcRequest::new(RequestId::Number(1.into()), "tools/call").with_params(
            json!({"name": "romanize_single", "arguments": {"text": "안녕"}})
                .as_object()
                .cloned()
                .unwrap(),
        )
    }

    fn client(url: &str) -> HttpRomanizeClient {
        HttpRomanizeClient::new(HttpRomanizeClientConfig::new(url).with_timeout(5)).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpRomanizeClientConfig::default();
        assert_eq!(config.base_url, "http://romanize-service:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_forwards_envelope_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/mcp/jsonrpc")
            .match_body(mockito::Matcher::Json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {"name": "romanize_single", "arguments": {"text": "안녕"}}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":"1","result":{"content":[{"type":"text","text":"annyeong"}]}}"#)
            .create_async()
            .await;

        let response = client(&server.url()).call(&romanize_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.id, Some(RequestId::String("1".to_string())));
        assert_eq!(response.result().unwrap()["content"][0]["text"], "annyeong");
    }

    #[tokio::test]
    async fn test_backend_error_envelope_relayed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/mcp/jsonrpc")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":"1","result":null,"error":{"code":-32602,"message":"text is required"}}"#)
            .create_async()
            .await;

        let response = client(&server.url()).call(&romanize_request()).await.unwrap();
        assert_eq!(response.error().unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/mcp/jsonrpc")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let result = client(&server.url()).call(&romanize_request()).await;
        match result {
            Err(BackendError::StatusError { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/mcp/jsonrpc")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let result = client(&server.url()).call(&romanize_request()).await;
        assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let result = client("http://127.0.0.1:1").call(&romanize_request()).await;
        assert!(matches!(result, Err(BackendError::NetworkError(_))));
    }
}
