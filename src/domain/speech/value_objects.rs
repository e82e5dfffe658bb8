//! Speech Context - Value Objects

use serde::Serialize;

use super::SpeechError;

/// 默认最大文本长度（按字符计）
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;

/// 音色名称最大长度
const MAX_VOICE_NAME_LENGTH: usize = 100;

/// 待合成文本
///
/// 不变量:
/// - 原始文本字符数不超过上限
/// - 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisText(String);

impl SynthesisText {
    pub fn new(raw: &str, max_chars: usize) -> Result<Self, SpeechError> {
        let actual = raw.chars().count();
        if actual > max_chars {
            return Err(SpeechError::TextTooLong {
                max: max_chars,
                actual,
            });
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 音色名称
///
/// 仅做格式检查，不校验是否存在于音色目录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, SpeechError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_VOICE_NAME_LENGTH {
            return Err(SpeechError::InvalidVoice(name));
        }
        // 名称会写入 SSML 属性
        if trimmed.chars().any(|c| matches!(c, '\'' | '"' | '<' | '>' | '&')) {
            return Err(SpeechError::InvalidVoice(name));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 韵律参数单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProsodyUnit {
    Percent,
    Hertz,
}

impl ProsodyUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Hertz => "Hz",
        }
    }
}

/// 带符号的韵律参数，如 `+10%`、`-5Hz`
///
/// 不变量:
/// - 以单位结尾
/// - 以 `+` 或 `-` 开头（裸 `0%` / `0Hz` 自动补为 `+0%` / `+0Hz`）
/// - 符号与单位之间是十进制数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProsodyValue(String);

impl ProsodyValue {
    pub fn parse(raw: &str, unit: ProsodyUnit, field: &'static str) -> Result<Self, SpeechError> {
        let invalid = |reason: &'static str| SpeechError::InvalidProsody {
            field,
            value: raw.to_string(),
            reason,
        };

        let suffix = unit.suffix();
        let Some(signed) = raw.strip_suffix(suffix) else {
            return Err(invalid(match unit {
                ProsodyUnit::Percent => "must end with '%'",
                ProsodyUnit::Hertz => "must end with 'Hz'",
            }));
        };

        if signed == "0" {
            return Ok(Self(format!("+0{}", suffix)));
        }

        let magnitude = signed
            .strip_prefix('+')
            .or_else(|| signed.strip_prefix('-'))
            .ok_or_else(|| invalid("must start with '+' or '-'"))?;

        if !is_decimal(magnitude) {
            return Err(invalid("magnitude must be a decimal number"));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn neutral(unit: ProsodyUnit) -> Self {
        Self(format!("+0{}", unit.suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProsodyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_decimal(s: &str) -> bool {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    !int.is_empty()
        && int.chars().all(|c| c.is_ascii_digit())
        && frac.map_or(true, |f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

/// 语速、音量、音高
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prosody {
    pub rate: ProsodyValue,
    pub volume: ProsodyValue,
    pub pitch: ProsodyValue,
}

impl Prosody {
    pub fn parse(rate: &str, volume: &str, pitch: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            rate: ProsodyValue::parse(rate, ProsodyUnit::Percent, "rate")?,
            volume: ProsodyValue::parse(volume, ProsodyUnit::Percent, "volume")?,
            pitch: ProsodyValue::parse(pitch, ProsodyUnit::Hertz, "pitch")?,
        })
    }
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            rate: ProsodyValue::neutral(ProsodyUnit::Percent),
            volume: ProsodyValue::neutral(ProsodyUnit::Percent),
            pitch: ProsodyValue::neutral(ProsodyUnit::Hertz),
        }
    }
}

/// 一次合成请求（已校验）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: SynthesisText,
    pub voice: VoiceName,
    pub prosody: Prosody,
}
