//! Speech Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成请求校验（文本、音色、韵律参数）
//! - 合成前的文本整理与分块
//! - 音色目录条目与名称校验

mod errors;
mod text_chunker;
mod text_preprocessor;
mod value_objects;
mod voice;

pub use errors::SpeechError;
pub use text_chunker::{chunk_text, ChunkConfig, DEFAULT_CHUNK_MAX_BYTES};
pub use text_preprocessor::preprocess_text;
pub use value_objects::{
    Prosody, ProsodyUnit, ProsodyValue, SynthesisRequest, SynthesisText, VoiceName,
    DEFAULT_MAX_TEXT_LENGTH,
};
pub use voice::{is_known_voice_name, VoiceDescriptor, KOREAN_VOICES};
