//! Speech Engine Port - 语音合成引擎抽象
//!
//! 定义合成与音色目录的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::domain::speech::{Prosody, VoiceDescriptor, VoiceName};

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Engine returned no audio")]
    NoAudio,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 音频字节流，按引擎输出顺序产出 MP3 数据块
pub type AudioStream = BoxStream<'static, Result<Bytes, EngineError>>;

/// 合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 已整理的文本
    pub text: String,
    pub voice: VoiceName,
    pub prosody: Prosody,
}

/// Speech Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 开始合成，返回惰性的音频数据流
    ///
    /// 连接阶段的错误直接返回；流中的错误表示合成中途失败
    async fn synthesize(&self, request: SpeechRequest) -> Result<AudioStream, EngineError>;

    /// 拉取引擎的完整音色目录
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError>;
}
