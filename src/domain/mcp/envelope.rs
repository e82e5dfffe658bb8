//! JSON-RPC 2.0 信封

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const JSONRPC_VERSION: &str = "2.0";

/// 错误码定义
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

fn default_version() -> String {
    JSONRPC_VERSION.to_string()
}

/// 请求 ID：字符串或数字
///
/// 数字按 JSON 原样保留（含 u64 与小数），回写时不丢精度
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(Number),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

/// JSON-RPC 请求
///
/// `id` 缺省时为通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default = "default_version")]
    pub jsonrpc: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    pub method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<Option<RequestId>>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_version(),
            id: id.into(),
            method: method.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

}

/// JSON-RPC 错误对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// 响应结果：result 与 error 二选一
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JsonRpcOutcome {
    #[serde(rename = "result")]
    Result(Value),
    #[serde(rename = "error")]
    Error(JsonRpcError),
}

/// JSON-RPC 响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResponse")]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<RequestId>,
    #[serde(flatten)]
    pub outcome: JsonRpcOutcome,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            outcome: JsonRpcOutcome::Result(result),
        }
    }

    pub fn failure(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            outcome: JsonRpcOutcome::Error(error),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            JsonRpcOutcome::Result(value) => Some(value),
            JsonRpcOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&JsonRpcError> {
        match &self.outcome {
            JsonRpcOutcome::Result(_) => None,
            JsonRpcOutcome::Error(error) => Some(error),
        }
    }
}

/// 宽松的反序列化形态
///
/// 部分后端会同时输出 `"result": null` 和 `"error": {...}`
#[derive(Deserialize)]
struct RawResponse {
    #[serde(default = "default_version")]
    jsonrpc: String,
    #[serde(default)]
    id: Option<RequestId>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

impl TryFrom<RawResponse> for JsonRpcResponse {
    type Error = String;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        let outcome = match (raw.result, raw.error) {
            (_, Some(error)) => JsonRpcOutcome::Error(error),
            (Some(result), None) => JsonRpcOutcome::Result(result),
            (None, None) => return Err("response has neither result nor error".to_string()),
        };
        Ok(Self {
            jsonrpc: raw.jsonrpc,
            id: raw.id,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_id_variants() {
        let req: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": "1", "method": "tools/list"}))
                .unwrap();
        assert_eq!(req.id, Some(RequestId::String("1".to_string())));

        let req: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"}))
                .unwrap();
        assert_eq!(req.id, Some(RequestId::Number(7.into())));

        let req: JsonRpcRequest =
            serde_json::from_value(json!({"method": "notifications/initialized"})).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.jsonrpc, "2.0");
    }

    #[test]
    fn test_number_ids_beyond_i64_echoed() {
        let req: JsonRpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":18446744073709551615,"method":"tools/list"}"#,
        )
        .unwrap();
        let resp = JsonRpcResponse::success(req.id, json!({}));
        let text = serde_json::to_string(&resp).unwrap();
        assert!(text.contains(r#""id":18446744073709551615"#));

        let req: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1.5,"method":"tools/list"}"#).unwrap();
        assert_eq!(req.id.map(|id| id.to_string()), Some("1.5".to_string()));
    }

    #[test]
    fn test_success_serializes_result_only() {
        let resp = JsonRpcResponse::success(Some(RequestId::Number(1.into())), json!({"ok": true}));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 1, "result": {"ok": true}}));
    }

    #[test]
    fn test_failure_serializes_error_only() {
        let resp = JsonRpcResponse::failure(
            None,
            JsonRpcError::new(error_codes::INTERNAL_ERROR, "Internal error").with_data("boom"),
        );
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32603, "message": "Internal error", "data": "boom"}
            })
        );
    }

    #[test]
    fn test_lenient_response_with_null_result() {
        let resp: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "3",
            "result": null,
            "error": {"code": -32601, "message": "Method not found"}
        }))
        .unwrap();
        assert_eq!(resp.error().map(|e| e.code), Some(error_codes::METHOD_NOT_FOUND));
        assert!(resp.result().is_none());
    }

    #[test]
    fn test_response_without_outcome_rejected() {
        let parsed = serde_json::from_value::<JsonRpcResponse>(json!({"jsonrpc": "2.0", "id": 1}));
        assert!(parsed.is_err());
    }
}
