//! MCP Context - 工具调用协议
//!
//! 职责:
//! - JSON-RPC 2.0 请求/响应信封
//! - 工具描述、工具调用参数与内容块

mod envelope;
mod tool;

pub use envelope::{
    error_codes, JsonRpcError, JsonRpcOutcome, JsonRpcRequest, JsonRpcResponse, RequestId,
    JSONRPC_VERSION,
};
pub use tool::{ToolCall, ToolContent, ToolDescriptor, ToolFamily, ToolResult};
