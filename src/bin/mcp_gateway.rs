//! mcp-gateway - MCP JSON-RPC 网关
//!
//! 本地应答 initialize / tools/list，tools/call 按工具名前缀分派到后端

use std::sync::Arc;

use voicegate::application::{McpDispatcher, SynthesisPolicy, TtsLinkBuilder};
use voicegate::config::{load_config, print_gateway_config};
use voicegate::infrastructure::adapters::{HttpRomanizeClient, HttpRomanizeClientConfig};
use voicegate::infrastructure::http::{gateway_app, GatewayState, HttpServer, ServerConfig};
use voicegate::infrastructure::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("Voicegate MCP Gateway v{}", env!("CARGO_PKG_VERSION"));
    print_gateway_config(&config);

    // 创建罗马字后端客户端
    let romanize_config = HttpRomanizeClientConfig::new(&config.gateway.romanize_url)
        .with_timeout(config.gateway.timeout_secs);
    let romanizer = Arc::new(HttpRomanizeClient::new(romanize_config)?);

    // TTS 参数按 tts-server 相同的规则校验
    let policy = SynthesisPolicy {
        default_voice: config.tts.default_voice.clone(),
        max_text_length: config.tts.max_text_length,
    };
    let links = TtsLinkBuilder::new(config.gateway.public_tts_url(), policy);
    let dispatcher = McpDispatcher::new(romanizer, links);

    let router = gateway_app(GatewayState::new(dispatcher));

    let server_config = ServerConfig::new(&config.gateway.host, config.gateway.port)
        .with_allowed_origins(config.gateway.allowed_origins.clone());
    let server = HttpServer::new(server_config, router);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Gateway shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c");
        return;
    }
    tracing::info!("Received shutdown signal");
}
