//! 静态工具目录
//!
//! 目录不依赖后端状态，后端不可用时 `tools/list` 仍返回完整列表

use serde_json::json;

use crate::domain::mcp::ToolDescriptor;

pub const ROMANIZE_SINGLE: &str = "romanize_single";
pub const ROMANIZE_LYRICS: &str = "romanize_lyrics";
pub const TTS_SYNTHESIZE: &str = "tts_synthesize";
pub const TTS_STREAM: &str = "tts_stream";

fn text_only_schema(description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": {
                "type": "string",
                "description": description
            }
        },
        "required": ["text"]
    })
}

/// 罗马字转换工具
pub fn romanize_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: ROMANIZE_SINGLE.to_string(),
            description: "Romanize a short single-line Korean sentence.".to_string(),
            input_schema: text_only_schema("Korean text to romanize (single line)"),
        },
        ToolDescriptor {
            name: ROMANIZE_LYRICS.to_string(),
            description: "Romanize multi-line Korean lyrics. Output interleaves Hangul, \
                          romanization and blank lines."
                .to_string(),
            input_schema: text_only_schema("Korean lyrics to romanize (multiple lines allowed)"),
        },
    ]
}

/// 语音合成工具
pub fn tts_tools(default_voice: &str) -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: TTS_SYNTHESIZE.to_string(),
            description: "Convert Korean text to speech and return a download link for the MP3 file."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string", "description": "Text to synthesize"},
                    "voice": {
                        "type": "string",
                        "description": "Voice name",
                        "default": default_voice
                    },
                    "rate": {"type": "string", "description": "Speaking rate", "default": "+0%"},
                    "volume": {"type": "string", "description": "Volume", "default": "+0%"},
                    "pitch": {"type": "string", "description": "Pitch", "default": "+0Hz"}
                },
                "required": ["text"]
            }),
        },
        ToolDescriptor {
            name: TTS_STREAM.to_string(),
            description: "Convert Korean text to speech and return a streaming playback link."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string", "description": "Text to synthesize"},
                    "voice": {
                        "type": "string",
                        "description": "Voice name",
                        "default": default_voice
                    }
                },
                "required": ["text"]
            }),
        },
    ]
}

/// 全部工具（罗马字在前）
pub fn all_tools(default_voice: &str) -> Vec<ToolDescriptor> {
    let mut tools = romanize_tools();
    tools.extend(tts_tools(default_voice));
    tools
}
