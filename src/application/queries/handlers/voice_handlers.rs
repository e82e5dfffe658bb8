//! Voice Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SpeechEnginePort;
use crate::application::queries::{ListVoices, ValidateVoice};
use crate::domain::speech::{is_known_voice_name, VoiceDescriptor};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateVoiceResponse {
    pub voice: String,
    pub valid: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    engine: Arc<dyn SpeechEnginePort>,
}

impl ListVoicesHandler {
    pub fn new(engine: Arc<dyn SpeechEnginePort>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoiceDescriptor>, ApplicationError> {
        let voices = self.engine.list_voices().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch voice catalog");
            ApplicationError::from(e)
        })?;

        tracing::info!(total_voices = voices.len(), "Voice catalog fetched");
        Ok(voices)
    }
}

/// ValidateVoice Handler
///
/// 只做静态判断，不访问引擎
#[derive(Default)]
pub struct ValidateVoiceHandler;

impl ValidateVoiceHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: ValidateVoice) -> ValidateVoiceResponse {
        let valid = is_known_voice_name(&query.voice_name);
        tracing::debug!(voice = %query.voice_name, valid, "Voice validated");
        ValidateVoiceResponse {
            voice: query.voice_name,
            valid,
        }
    }
}
