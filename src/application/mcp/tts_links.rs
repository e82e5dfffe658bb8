//! TTS 链接构造
//!
//! 网关不代理音频：校验参数后返回指向 TTS 服务的 GET 链接

use crate::application::commands::{SynthesisPolicy, SynthesizeSpeech};
use crate::application::mcp::error::GatewayError;
use crate::application::mcp::tool_catalog::{TTS_STREAM, TTS_SYNTHESIZE};
use crate::domain::mcp::ToolCall;

/// TTS 服务端点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsEndpoint {
    /// 下载（attachment）
    Synthesize,
    /// 在线播放（inline）
    Stream,
}

impl TtsEndpoint {
    pub fn from_tool(name: &str) -> Option<Self> {
        match name {
            TTS_SYNTHESIZE => Some(Self::Synthesize),
            TTS_STREAM => Some(Self::Stream),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Synthesize => "/api/v1/tts/synthesize",
            Self::Stream => "/api/v1/tts/stream",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Synthesize => "Download MP3",
            Self::Stream => "Stream audio",
        }
    }
}

/// 链接构造器
#[derive(Debug, Clone)]
pub struct TtsLinkBuilder {
    public_base_url: String,
    policy: SynthesisPolicy,
}

impl TtsLinkBuilder {
    pub fn new(public_base_url: impl Into<String>, policy: SynthesisPolicy) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            public_base_url,
            policy,
        }
    }

    pub fn default_voice(&self) -> &str {
        &self.policy.default_voice
    }

    /// 校验参数并生成链接
    pub fn build_url(&self, endpoint: TtsEndpoint, call: &ToolCall) -> Result<String, GatewayError> {
        let command = SynthesizeSpeech {
            text: string_arg(call, "text")?
                .ok_or_else(|| GatewayError::InvalidParams("missing required argument: text".into()))?,
            voice: string_arg(call, "voice")?,
            rate: string_arg(call, "rate")?,
            volume: string_arg(call, "volume")?,
            pitch: string_arg(call, "pitch")?,
        };
        let request = command
            .validate(&self.policy)
            .map_err(|e| GatewayError::InvalidParams(e.to_string()))?;

        let query = [
            ("text", request.text.as_str()),
            ("voice", request.voice.as_str()),
            ("rate", request.prosody.rate.as_str()),
            ("volume", request.prosody.volume.as_str()),
            ("pitch", request.prosody.pitch.as_str()),
        ]
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

        Ok(format!("{}{}?{}", self.public_base_url, endpoint.path(), query))
    }

    /// 生成给 MCP 客户端的文本内容
    pub fn build_message(&self, endpoint: TtsEndpoint, call: &ToolCall) -> Result<String, GatewayError> {
        let url = self.build_url(endpoint, call)?;
        Ok(format!("{}: {}", endpoint.label(), url))
    }
}

fn string_arg(call: &ToolCall, key: &str) -> Result<Option<String>, GatewayError> {
    match call.arguments.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(GatewayError::InvalidParams(format!(
            "argument '{}' must be a string",
            key
        ))),
    }
}
