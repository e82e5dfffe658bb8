//! Voice HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{ListVoices, ValidateVoice};
use crate::infrastructure::http::dto::{VoiceListResponse, VoiceValidationResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::TtsState;

/// GET /api/v1/voices/voices
pub async fn list_voices(
    State(state): State<Arc<TtsState>>,
) -> Result<Json<VoiceListResponse>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices).await?;
    Ok(Json(voices.into()))
}

/// GET /api/v1/voices/voices/:voice_name/validate
pub async fn validate_voice(
    State(state): State<Arc<TtsState>>,
    Path(voice_name): Path<String>,
) -> Json<VoiceValidationResponse> {
    let result = state
        .validate_voice_handler
        .handle(ValidateVoice { voice_name });
    Json(result.into())
}
