//! Synthesize Commands

use crate::domain::speech::{
    Prosody, SpeechError, SynthesisRequest, SynthesisText, VoiceName, DEFAULT_MAX_TEXT_LENGTH,
};

/// 默认音色
pub const DEFAULT_VOICE: &str = "ko-KR-SunHiNeural";

/// 合成参数的缺省值与上限
#[derive(Debug, Clone)]
pub struct SynthesisPolicy {
    pub default_voice: String,
    pub max_text_length: usize,
}

impl Default for SynthesisPolicy {
    fn default() -> Self {
        Self {
            default_voice: DEFAULT_VOICE.to_string(),
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

/// 合成语音命令（未校验的原始参数）
#[derive(Debug, Clone, Default)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub voice: Option<String>,
    pub rate: Option<String>,
    pub volume: Option<String>,
    pub pitch: Option<String>,
}

impl SynthesizeSpeech {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// 按策略补齐缺省值并校验
    pub fn validate(&self, policy: &SynthesisPolicy) -> Result<SynthesisRequest, SpeechError> {
        let text = SynthesisText::new(&self.text, policy.max_text_length)?;
        let voice = VoiceName::new(
            self.voice
                .clone()
                .unwrap_or_else(|| policy.default_voice.clone()),
        )?;
        let prosody = Prosody::parse(
            self.rate.as_deref().unwrap_or("+0%"),
            self.volume.as_deref().unwrap_or("+0%"),
            self.pitch.as_deref().unwrap_or("+0Hz"),
        )?;

        Ok(SynthesisRequest {
            text,
            voice,
            prosody,
        })
    }
}
