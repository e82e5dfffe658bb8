//! MCP 网关用例
//!
//! - dispatcher: JSON-RPC 方法分发
//! - tool_catalog: 静态工具目录
//! - tts_links: TTS 链接构造
//! - error: 网关错误与错误码映射

mod dispatcher;
mod error;
mod tool_catalog;
mod tts_links;

pub use dispatcher::{McpDispatcher, ServerInfo, MCP_PROTOCOL_VERSION};
pub use error::GatewayError;
pub use tool_catalog::{all_tools, romanize_tools, tts_tools};
pub use tts_links::{TtsEndpoint, TtsLinkBuilder};
