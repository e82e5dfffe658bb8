//! Voice Queries

/// 列出引擎全部音色
#[derive(Debug, Clone)]
pub struct ListVoices;

/// 校验音色名称
#[derive(Debug, Clone)]
pub struct ValidateVoice {
    pub voice_name: String,
}
