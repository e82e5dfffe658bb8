//! Edge 音色目录

use reqwest::Client;
use serde::Deserialize;

use super::protocol;
use crate::application::ports::EngineError;
use crate::domain::speech::VoiceDescriptor;

/// 目录条目（上游字段为 PascalCase）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EdgeVoice {
    short_name: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    locale: String,
    #[serde(default)]
    voice_tag: EdgeVoiceTag,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EdgeVoiceTag {
    #[serde(default)]
    content_categories: Vec<String>,
    #[serde(default)]
    voice_personalities: Vec<String>,
}

impl From<EdgeVoice> for VoiceDescriptor {
    fn from(voice: EdgeVoice) -> Self {
        Self {
            name: voice.short_name,
            gender: voice.gender,
            locale: voice.locale,
            content_categories: voice.voice_tag.content_categories,
            voice_personalities: voice.voice_tag.voice_personalities,
        }
    }
}

/// 拉取并整理音色目录
pub(super) async fn fetch_voices(
    client: &Client,
    base_url: &str,
) -> Result<Vec<VoiceDescriptor>, EngineError> {
    let url = protocol::voices_url(base_url);
    tracing::debug!(url = %base_url, "Fetching voice catalog");

    let response = client
        .get(&url)
        .header("Accept", "*/*")
        .header("User-Agent", protocol::USER_AGENT)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else {
                EngineError::NetworkError(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EngineError::InvalidResponse(format!(
            "voice list returned HTTP {}: {}",
            status, body
        )));
    }

    let voices: Vec<EdgeVoice> = response
        .json()
        .await
        .map_err(|e| EngineError::InvalidResponse(format!("Failed to parse voice list: {}", e)))?;

    Ok(voices.into_iter().map(VoiceDescriptor::from).collect())
}
