//! Voicegate - 韩语语音合成代理与 MCP 网关
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 合成参数校验、文本整理与分块、音色目录
//! - MCP Context: JSON-RPC 信封、工具描述
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SpeechEngine, RomanizeBackend）
//! - Commands: 语音合成命令处理器
//! - Queries: 音色查询处理器
//! - MCP: 网关分发、工具目录、TTS 链接
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: tts-server 与 mcp-gateway 的路由
//! - Adapters: Edge 引擎、Fake 引擎、罗马字后端客户端
//! - Logging: tracing 初始化

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
