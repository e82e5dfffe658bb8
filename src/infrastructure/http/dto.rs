//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{SynthesizeSpeech, ValidateVoiceResponse};
use crate::domain::speech::VoiceDescriptor;

// ============================================================================
// TTS DTOs
// ============================================================================

/// 合成请求（查询串与 JSON 请求体共用）
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub pitch: Option<String>,
}

impl From<SynthesizeRequest> for SynthesizeSpeech {
    fn from(req: SynthesizeRequest) -> Self {
        Self {
            text: req.text,
            voice: req.voice,
            rate: req.rate,
            volume: req.volume,
            pitch: req.pitch,
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceDescriptor>,
    pub total: usize,
}

impl From<Vec<VoiceDescriptor>> for VoiceListResponse {
    fn from(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            total: voices.len(),
            voices,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceValidationResponse {
    pub voice: String,
    pub valid: bool,
}

impl From<ValidateVoiceResponse> for VoiceValidationResponse {
    fn from(resp: ValidateVoiceResponse) -> Self {
        Self {
            voice: resp.voice,
            valid: resp.valid,
        }
    }
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}
