//! Application State
//!
//! 两个服务各自的路由状态，handler 在 main 中构造后注入

use std::sync::Arc;

use crate::application::{
    ListVoicesHandler, McpDispatcher, SpeechEnginePort, SynthesisPolicy, SynthesizeHandler,
    ValidateVoiceHandler,
};

/// TTS 服务状态
pub struct TtsState {
    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub validate_voice_handler: ValidateVoiceHandler,
}

impl TtsState {
    pub fn new(engine: Arc<dyn SpeechEnginePort>, policy: SynthesisPolicy) -> Self {
        Self {
            synthesize_handler: SynthesizeHandler::new(engine.clone(), policy),
            list_voices_handler: ListVoicesHandler::new(engine),
            validate_voice_handler: ValidateVoiceHandler::new(),
        }
    }
}

/// MCP 网关状态
pub struct GatewayState {
    pub dispatcher: McpDispatcher,
}

impl GatewayState {
    pub fn new(dispatcher: McpDispatcher) -> Self {
        Self { dispatcher }
    }
}
