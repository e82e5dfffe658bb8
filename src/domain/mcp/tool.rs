//! MCP 工具描述与内容块

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 工具描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// 按名称前缀区分的工具族
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    Romanize,
    Tts,
    Unknown,
}

impl ToolFamily {
    pub fn of(tool_name: &str) -> Self {
        if tool_name.starts_with("romanize_") {
            Self::Romanize
        } else if tool_name.starts_with("tts_") {
            Self::Tts
        } else {
            Self::Unknown
        }
    }
}

/// `tools/call` 的参数
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    /// 从请求参数中取出工具名和参数
    pub fn from_params(params: Option<&Map<String, Value>>) -> Result<Self, String> {
        let params = params.ok_or("missing params")?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or("missing tool name")?
            .to_string();
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(_) => return Err("arguments must be an object".to_string()),
        };
        Ok(Self { name, arguments })
    }

    pub fn family(&self) -> ToolFamily {
        ToolFamily::of(&self.name)
    }

    /// 字符串参数（非字符串按缺省处理）
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

/// MCP 内容块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// `tools/call` 的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
        }
    }
}
