//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Speech Context: 语音合成请求与音色
//! - MCP Context: JSON-RPC 工具调用协议

pub mod mcp;
pub mod speech;
