//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechEngine、RomanizeBackend）
//! - commands: 语音合成命令及处理器
//! - queries: 音色查询及处理器
//! - mcp: MCP 网关分发
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod mcp;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{SynthesisOutput, SynthesizeHandler},
    SynthesisPolicy, SynthesizeSpeech, DEFAULT_VOICE,
};

pub use error::ApplicationError;

pub use mcp::{GatewayError, McpDispatcher, ServerInfo, TtsEndpoint, TtsLinkBuilder};

pub use ports::{
    AudioStream, BackendError, EngineError, RomanizeBackendPort, SpeechEnginePort, SpeechRequest,
};

pub use queries::{
    handlers::{ListVoicesHandler, ValidateVoiceHandler, ValidateVoiceResponse},
    ListVoices, ValidateVoice,
};
