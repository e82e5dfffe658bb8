//! Fake Speech Engine - 用于测试和离线运行的合成引擎
//!
//! 不访问网络，始终返回配置的音频块（默认是静音 MP3 帧）

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use std::sync::Mutex;

use crate::application::ports::{AudioStream, EngineError, SpeechEnginePort, SpeechRequest};
use crate::domain::speech::VoiceDescriptor;

/// 一帧静音 MP3（MPEG-1 Layer III, 128kbps, 44.1kHz, 单声道）
fn silent_mp3_frame() -> Vec<u8> {
    let mut frame = vec![0xFF, 0xFB, 0x90, 0x64];
    frame.resize(417, 0);
    frame
}

fn default_voices() -> Vec<VoiceDescriptor> {
    [
        ("ko-KR-SunHiNeural", "Female"),
        ("ko-KR-InJoonNeural", "Male"),
        ("ko-KR-HyunsuMultilingualNeural", "Male"),
        ("ko-KR-BongJinNeural", "Male"),
        ("ko-KR-GookMinNeural", "Male"),
        ("ko-KR-HyunsuNeural", "Male"),
        ("ko-KR-JiMinNeural", "Female"),
        ("ko-KR-SeoHyeonNeural", "Female"),
        ("ko-KR-SoonBokNeural", "Female"),
        ("ko-KR-YuJinNeural", "Female"),
    ]
    .into_iter()
    .map(|(name, gender)| VoiceDescriptor {
        name: name.to_string(),
        gender: gender.to_string(),
        locale: "ko-KR".to_string(),
        content_categories: vec!["General".to_string()],
        voice_personalities: vec!["Friendly".to_string(), "Positive".to_string()],
    })
    .collect()
}

/// Fake Speech Engine 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechEngineConfig {
    /// 每次合成依次返回的音频块
    pub chunks: Vec<Vec<u8>>,
    /// 音色目录
    pub voices: Vec<VoiceDescriptor>,
    /// 为 true 时所有调用都失败
    pub fail: bool,
}

impl Default for FakeSpeechEngineConfig {
    fn default() -> Self {
        Self {
            chunks: vec![silent_mp3_frame(); 3],
            voices: default_voices(),
            fail: false,
        }
    }
}

/// Fake Speech Engine
pub struct FakeSpeechEngine {
    config: FakeSpeechEngineConfig,
    last_text: Mutex<Option<String>>,
}

impl FakeSpeechEngine {
    pub fn new(config: FakeSpeechEngineConfig) -> Self {
        tracing::info!(
            chunks = config.chunks.len(),
            voices = config.voices.len(),
            "FakeSpeechEngine initialized"
        );
        Self {
            config,
            last_text: Mutex::new(None),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeSpeechEngineConfig::default())
    }

    /// 所有调用都返回网络错误
    pub fn failing() -> Self {
        Self::new(FakeSpeechEngineConfig {
            fail: true,
            ..Default::default()
        })
    }

    /// 最近一次收到的合成文本
    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().ok().and_then(|text| text.clone())
    }
}

#[async_trait]
impl SpeechEnginePort for FakeSpeechEngine {
    async fn synthesize(&self, request: SpeechRequest) -> Result<AudioStream, EngineError> {
        tracing::debug!(
            voice = %request.voice,
            text_len = request.text.chars().count(),
            "FakeSpeechEngine: returning fixed audio"
        );

        if let Ok(mut last) = self.last_text.lock() {
            *last = Some(request.text);
        }

        if self.config.fail {
            return Err(EngineError::NetworkError(
                "fake engine configured to fail".to_string(),
            ));
        }

        let chunks: Vec<Result<Bytes, EngineError>> = self
            .config
            .chunks
            .iter()
            .map(|chunk| Ok(Bytes::from(chunk.clone())))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError> {
        if self.config.fail {
            return Err(EngineError::NetworkError(
                "fake engine configured to fail".to_string(),
            ));
        }
        Ok(self.config.voices.clone())
    }
}
