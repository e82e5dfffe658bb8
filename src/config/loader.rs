//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 显式指定配置文件的环境变量
pub const CONFIG_PATH_ENV: &str = "VOICEGATE_CONFIG";

/// 环境变量前缀
const ENV_PREFIX: &str = "VOICEGATE";

/// 最小分块尺寸（字节）
const MIN_CHUNK_MAX_BYTES: usize = 256;

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICEGATE_`，层级分隔符 `__`）
/// 2. 配置文件（`VOICEGATE_CONFIG` 指定的文件，否则 config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICEGATE_SERVER__PORT=8000`
/// - `VOICEGATE_TTS__ENGINE=fake`
/// - `VOICEGATE_GATEWAY__ROMANIZE_URL=http://romanize-service:8080`
/// - `VOICEGATE_SERVER__ALLOWED_ORIGINS=http://a.example,http://b.example`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    load_config_from_path(explicit.as_deref())
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("tts.default_voice", "ko-KR-SunHiNeural")?
        .set_default("tts.max_text_length", 5000)?
        .set_default("tts.output_format", "audio-24khz-48kbitrate-mono-mp3")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("tts.chunk_max_bytes", 4096)?
        .set_default("tts.engine", "edge")?
        .set_default("gateway.host", "0.0.0.0")?
        .set_default("gateway.port", 8080)?
        .set_default("gateway.romanize_url", "http://romanize-service:8080")?
        .set_default("gateway.tts_url", "http://tts-service:8000")?
        .set_default("gateway.timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写；来源列表用逗号分隔
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("server.allowed_origins")
            .with_list_parse_key("gateway.allowed_origins"),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.gateway.port == 0 {
        return Err(ConfigError::ValidationError(
            "Gateway port cannot be 0".to_string(),
        ));
    }

    if config.tts.max_text_length == 0 {
        return Err(ConfigError::ValidationError(
            "TTS max_text_length must be greater than 0".to_string(),
        ));
    }

    if config.tts.chunk_max_bytes < MIN_CHUNK_MAX_BYTES {
        return Err(ConfigError::ValidationError(format!(
            "TTS chunk_max_bytes must be at least {}",
            MIN_CHUNK_MAX_BYTES
        )));
    }

    if config.tts.default_voice.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS default_voice cannot be empty".to_string(),
        ));
    }

    let urls = [
        ("gateway.romanize_url", config.gateway.romanize_url.as_str()),
        ("gateway.tts_url", config.gateway.tts_url.as_str()),
        ("gateway.public_tts_url", config.gateway.public_tts_url()),
    ];
    for (key, url) in urls {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                key
            )));
        }
    }

    Ok(())
}

/// 打印 tts-server 配置（用于启动时日志）
pub fn print_tts_config(config: &AppConfig) {
    tracing::info!("=== TTS Server Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Engine: {}", config.tts.engine);
    tracing::info!("Default Voice: {}", config.tts.default_voice);
    tracing::info!("Max Text Length: {}", config.tts.max_text_length);
    tracing::info!("Output Format: {}", config.tts.output_format);
    tracing::info!("Chunk Max Bytes: {}", config.tts.chunk_max_bytes);
    tracing::info!("Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("================================");
}

/// 打印 mcp-gateway 配置（用于启动时日志）
pub fn print_gateway_config(config: &AppConfig) {
    tracing::info!("=== MCP Gateway Configuration ===");
    tracing::info!("Server: {}", config.gateway.addr());
    tracing::info!("Romanize URL: {}", config.gateway.romanize_url);
    tracing::info!("TTS URL: {}", config.gateway.tts_url);
    tracing::info!("Public TTS URL: {}", config.gateway.public_tts_url());
    tracing::info!("Timeout: {}s", config.gateway.timeout_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::EngineKind;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.tts.engine, EngineKind::Edge);
        assert_eq!(config.gateway.public_tts_url(), "http://tts-service:8000");
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.gateway.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_urls() {
        let mut config = AppConfig::default();
        config.gateway.romanize_url = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.gateway.public_tts_url = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_tts_limits() {
        let mut config = AppConfig::default();
        config.tts.max_text_length = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.tts.chunk_max_bytes = 100;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000
allowed_origins = ["http://ui.example"]

[tts]
engine = "fake"
max_text_length = 100

[gateway]
public_tts_url = "https://tts.example.com"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.allowed_origins, vec!["http://ui.example"]);
        assert_eq!(config.tts.engine, EngineKind::Fake);
        assert_eq!(config.tts.max_text_length, 100);
        assert_eq!(config.tts.default_voice, "ko-KR-SunHiNeural");
        assert_eq!(config.gateway.public_tts_url(), "https://tts.example.com");
    }

    #[test]
    fn test_unknown_engine_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[tts]\nengine = \"polly\"").unwrap();

        let result = load_config_from_path(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/voicegate.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
