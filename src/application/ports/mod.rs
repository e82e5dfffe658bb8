//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod romanize_backend;
mod speech_engine;

pub use romanize_backend::{BackendError, RomanizeBackendPort};
pub use speech_engine::{AudioStream, EngineError, SpeechEnginePort, SpeechRequest};
