//! TTS HTTP Handlers

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::TtsState;

const AUDIO_FILENAME: &str = "audio.mp3";

/// 音频的呈现方式
#[derive(Debug, Clone, Copy)]
enum Disposition {
    /// 下载
    Attachment,
    /// 在线播放
    Inline,
}

impl Disposition {
    fn header_value(self) -> String {
        let kind = match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        };
        format!("{}; filename={}", kind, AUDIO_FILENAME)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/tts/synthesize
pub async fn synthesize_query(
    State(state): State<Arc<TtsState>>,
    query: Result<Query<SynthesizeRequest>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(req) = query?;
    audio_response(&state, req, Disposition::Attachment).await
}

/// POST /api/v1/tts/synthesize
pub async fn synthesize_json(
    State(state): State<Arc<TtsState>>,
    payload: Result<Json<SynthesizeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    audio_response(&state, req, Disposition::Attachment).await
}

/// GET /api/v1/tts/stream
pub async fn stream_query(
    State(state): State<Arc<TtsState>>,
    query: Result<Query<SynthesizeRequest>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(req) = query?;
    audio_response(&state, req, Disposition::Inline).await
}

/// POST /api/v1/tts/stream
pub async fn stream_json(
    State(state): State<Arc<TtsState>>,
    payload: Result<Json<SynthesizeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    audio_response(&state, req, Disposition::Inline).await
}

/// 合成并以 audio/mpeg 流式返回
///
/// 首个音频块之后的引擎错误只能中断响应体
async fn audio_response(
    state: &TtsState,
    req: SynthesizeRequest,
    disposition: Disposition,
) -> Result<Response, ApiError> {
    let output = state.synthesize_handler.handle(req.into()).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CONTENT_DISPOSITION, disposition.header_value())
        .header(header::CACHE_CONTROL, "no-cache")
        .header("X-Voice", output.voice.as_str())
        .header("X-Text-Length", output.text_length.to_string())
        .body(Body::from_stream(output.audio))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
