//! Synthesize Command Handlers

use futures_util::stream::{self, StreamExt};
use std::sync::Arc;

use crate::application::commands::{SynthesisPolicy, SynthesizeSpeech};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStream, EngineError, SpeechEnginePort, SpeechRequest};
use crate::domain::speech::{preprocess_text, VoiceName};

/// 合成结果
pub struct SynthesisOutput {
    pub voice: VoiceName,
    /// 客户端提交的原始文本字符数（未去空白）
    pub text_length: usize,
    pub audio: AudioStream,
}

/// SynthesizeSpeech Handler
pub struct SynthesizeHandler {
    engine: Arc<dyn SpeechEnginePort>,
    policy: SynthesisPolicy,
}

impl SynthesizeHandler {
    pub fn new(engine: Arc<dyn SpeechEnginePort>, policy: SynthesisPolicy) -> Self {
        Self { engine, policy }
    }

    pub async fn handle(&self, command: SynthesizeSpeech) -> Result<SynthesisOutput, ApplicationError> {
        let request = command.validate(&self.policy)?;
        let text_length = command.text.chars().count();
        let voice = request.voice.clone();

        let text = preprocess_text(request.text.as_str());

        tracing::info!(
            voice = %voice,
            text_len = text_length,
            processed_len = text.chars().count(),
            rate = %request.prosody.rate,
            volume = %request.prosody.volume,
            pitch = %request.prosody.pitch,
            "Starting synthesis"
        );

        let mut audio = self
            .engine
            .synthesize(SpeechRequest {
                text,
                voice: request.voice,
                prosody: request.prosody,
            })
            .await
            .map_err(|e| {
                tracing::error!(voice = %voice, error = %e, "Synthesis failed to start");
                ApplicationError::from(e)
            })?;

        // 首块到达前不提交响应头，使早期失败仍能映射为错误状态码
        let first = match audio.next().await {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => {
                tracing::error!(voice = %voice, error = %e, "Synthesis failed before first chunk");
                return Err(e.into());
            }
            None => {
                tracing::error!(voice = %voice, "Synthesis produced no audio");
                return Err(EngineError::NoAudio.into());
            }
        };

        let audio = stream::once(async move { Ok(first) }).chain(audio).boxed();

        Ok(SynthesisOutput {
            voice,
            text_length,
            audio,
        })
    }
}
