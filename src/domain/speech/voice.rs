//! Speech Context - 音色目录条目与名称校验

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// 内置的韩语音色
pub const KOREAN_VOICES: [&str; 10] = [
    "ko-KR-SunHiNeural",
    "ko-KR-InJoonNeural",
    "ko-KR-HyunsuMultilingualNeural",
    "ko-KR-BongJinNeural",
    "ko-KR-GookMinNeural",
    "ko-KR-HyunsuNeural",
    "ko-KR-JiMinNeural",
    "ko-KR-SeoHyeonNeural",
    "ko-KR-SoonBokNeural",
    "ko-KR-YuJinNeural",
];

/// 语言-地区-名称Neural
static NEURAL_VOICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2}-[A-Z]{2}-[A-Za-z]+Neural$").unwrap());

/// 音色名称是否看起来有效
///
/// 只做静态判断：内置韩语音色或符合 `xx-YY-NameNeural` 形式，不访问引擎
pub fn is_known_voice_name(name: &str) -> bool {
    KOREAN_VOICES.contains(&name) || NEURAL_VOICE_PATTERN.is_match(name)
}

/// 音色目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceDescriptor {
    pub name: String,
    pub gender: String,
    pub locale: String,
    pub content_categories: Vec<String>,
    pub voice_personalities: Vec<String>,
}
