//! tts-server - Edge 神经音色语音合成代理
//!
//! 接收文本，转发给合成引擎，以 audio/mpeg 流式返回

use std::sync::Arc;

use voicegate::application::{SpeechEnginePort, SynthesisPolicy};
use voicegate::config::{load_config, print_tts_config, EngineKind};
use voicegate::infrastructure::adapters::{
    EdgeSpeechEngine, EdgeSpeechEngineConfig, FakeSpeechEngine,
};
use voicegate::infrastructure::http::{tts_app, HttpServer, ServerConfig, TtsState};
use voicegate::infrastructure::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("Voicegate TTS Server v{}", env!("CARGO_PKG_VERSION"));
    print_tts_config(&config);

    // 创建合成引擎
    let engine: Arc<dyn SpeechEnginePort> = match config.tts.engine {
        EngineKind::Edge => {
            let edge_config = EdgeSpeechEngineConfig::default()
                .with_timeout(config.tts.timeout_secs)
                .with_output_format(config.tts.output_format.clone())
                .with_chunk_max_bytes(config.tts.chunk_max_bytes);
            Arc::new(EdgeSpeechEngine::new(edge_config)?)
        }
        EngineKind::Fake => {
            tracing::warn!("Using fake speech engine, responses contain silence only");
            Arc::new(FakeSpeechEngine::with_defaults())
        }
    };

    let policy = SynthesisPolicy {
        default_voice: config.tts.default_voice.clone(),
        max_text_length: config.tts.max_text_length,
    };
    let router = tts_app(TtsState::new(engine, policy));

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_allowed_origins(config.server.allowed_origins.clone());
    let server = HttpServer::new(server_config, router);

    // 启动服务器（带优雅关闭）
    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}
