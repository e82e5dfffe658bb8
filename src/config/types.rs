//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置（两个服务共用，各取所需）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// tts-server 监听配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// mcp-gateway 配置
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_tts_port")]
    pub port: u16,

    /// 允许跨域的来源，空表示任意来源
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_tts_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_tts_port(),
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Edge read aloud 在线服务
    Edge,
    /// 返回静音帧的离线引擎
    Fake,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edge => write!(f, "edge"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 默认音色
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// 文本最大字符数
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// 引擎输出格式
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 引擎请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 单条 SSML 消息的文本上限（字节）
    #[serde(default = "default_chunk_max_bytes")]
    pub chunk_max_bytes: usize,

    /// 引擎类型
    #[serde(default = "default_engine")]
    pub engine: EngineKind,
}

fn default_voice() -> String {
    "ko-KR-SunHiNeural".to_string()
}

fn default_max_text_length() -> usize {
    5000
}

fn default_output_format() -> String {
    "audio-24khz-48kbitrate-mono-mp3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_chunk_max_bytes() -> usize {
    4096
}

fn default_engine() -> EngineKind {
    EngineKind::Edge
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            default_voice: default_voice(),
            max_text_length: default_max_text_length(),
            output_format: default_output_format(),
            timeout_secs: default_timeout_secs(),
            chunk_max_bytes: default_chunk_max_bytes(),
            engine: default_engine(),
        }
    }
}

/// MCP 网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// 罗马字转换后端
    #[serde(default = "default_romanize_url")]
    pub romanize_url: String,

    /// TTS 服务（内网地址）
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// 返回给 MCP 客户端的 TTS 地址
    /// 如果未设置，则使用 tts_url
    #[serde(default)]
    pub public_tts_url: Option<String>,

    /// 后端请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 允许跨域的来源，空表示任意来源
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_romanize_url() -> String {
    "http://romanize-service:8080".to_string()
}

fn default_tts_url() -> String {
    "http://tts-service:8000".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_gateway_port(),
            romanize_url: default_romanize_url(),
            tts_url: default_tts_url(),
            public_tts_url: None,
            timeout_secs: default_timeout_secs(),
            allowed_origins: Vec::new(),
        }
    }
}

impl GatewayConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 TTS Base URL
    pub fn public_tts_url(&self) -> &str {
        self.public_tts_url.as_deref().unwrap_or(&self.tts_url)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
