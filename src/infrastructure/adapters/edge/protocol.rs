//! Edge read aloud 协议细节
//!
//! 消息格式：文本帧为 `头部\r\n\r\n正文`；二进制帧前 2 字节为大端头部长度

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::application::ports::EngineError;
use crate::domain::speech::{Prosody, VoiceName};

pub const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";
pub const SEC_MS_GEC_VERSION: &str = "1-130.0.2849.68";
pub const SYNTHESIS_URL: &str =
    "wss://speech.platform.bing.com/consumer/speech/synthesize/readaloud/edge/v1";
pub const VOICES_URL: &str =
    "https://speech.platform.bing.com/consumer/speech/synthesize/readaloud/voices/list";
pub const DEFAULT_OUTPUT_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

pub const ORIGIN: &str = "chrome-extension://jdiccldimpdaibmpdkjnbmckianbfold";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0";

/// Windows 纪元（1601-01-01）与 Unix 纪元之差（秒）
const WIN_EPOCH: u64 = 11_644_473_600;

/// 根据 Unix 秒数计算 `Sec-MS-GEC`
///
/// 时间向下取整到 5 分钟，换算成 100ns 刻度后与令牌拼接做 SHA-256
pub fn sec_ms_gec_at(unix_secs: u64) -> String {
    let mut ticks = unix_secs + WIN_EPOCH;
    ticks -= ticks % 300;
    let ticks_100ns = ticks as u128 * 10_000_000;

    let mut hasher = Sha256::new();
    hasher.update(format!("{}{}", ticks_100ns, TRUSTED_CLIENT_TOKEN));
    hex::encode(hasher.finalize()).to_uppercase()
}

/// 当前时刻的 `Sec-MS-GEC`
pub fn sec_ms_gec() -> String {
    let unix_secs = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    sec_ms_gec_at(unix_secs)
}

/// 合成 websocket 地址
pub fn synthesis_url(base: &str, connection_id: &str) -> String {
    format!(
        "{}?TrustedClientToken={}&ConnectionId={}&Sec-MS-GEC={}&Sec-MS-GEC-Version={}",
        base,
        TRUSTED_CLIENT_TOKEN,
        connection_id,
        sec_ms_gec(),
        SEC_MS_GEC_VERSION
    )
}

/// 音色目录地址
pub fn voices_url(base: &str) -> String {
    format!(
        "{}?trustedclienttoken={}&Sec-MS-GEC={}&Sec-MS-GEC-Version={}",
        base,
        TRUSTED_CLIENT_TOKEN,
        sec_ms_gec(),
        SEC_MS_GEC_VERSION
    )
}

/// JavaScript `Date.toString()` 风格的时间戳
fn timestamp() -> String {
    Utc::now()
        .format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
        .to_string()
}

/// `speech.config` 消息
pub fn speech_config_message(output_format: &str) -> String {
    format!(
        "X-Timestamp:{}\r\n\
         Content-Type:application/json; charset=utf-8\r\n\
         Path:speech.config\r\n\r\n\
         {{\"context\":{{\"synthesis\":{{\"audio\":{{\"metadataoptions\":{{\
         \"sentenceBoundaryEnabled\":\"false\",\"wordBoundaryEnabled\":\"false\"}},\
         \"outputFormat\":\"{}\"}}}}}}}}",
        timestamp(),
        output_format
    )
}

/// 去掉服务端不接受的控制字符（保留 \t \n \r）
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// 构造 SSML 文档
pub fn build_ssml(text: &str, voice: &VoiceName, prosody: &Prosody) -> String {
    let text = strip_control_chars(text);
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='en-US'>\
         <voice name='{}'><prosody pitch='{}' rate='{}' volume='{}'>{}</prosody></voice></speak>",
        quick_xml::escape::escape(voice.as_str()),
        prosody.pitch,
        prosody.rate,
        prosody.volume,
        quick_xml::escape::escape(text.as_str())
    )
}

/// `ssml` 消息
pub fn ssml_message(request_id: &str, ssml: &str) -> String {
    format!(
        "X-RequestId:{}\r\n\
         Content-Type:application/ssml+xml\r\n\
         X-Timestamp:{}Z\r\n\
         Path:ssml\r\n\r\n\
         {}",
        request_id,
        timestamp(),
        ssml
    )
}

/// 文本帧是否表示本轮结束
pub fn is_turn_end(frame: &str) -> bool {
    frame.contains("Path:turn.end")
}

/// 从二进制帧中取出音频负载
///
/// 非音频帧返回 `Ok(None)`
pub fn audio_payload(frame: &[u8]) -> Result<Option<&[u8]>, EngineError> {
    if frame.len() < 2 {
        return Err(EngineError::ProtocolError(
            "binary frame shorter than header length".to_string(),
        ));
    }
    let header_len = u16::from_be_bytes([frame[0], frame[1]]) as usize;
    if frame.len() < 2 + header_len {
        return Err(EngineError::ProtocolError(format!(
            "binary frame header length {} exceeds frame size {}",
            header_len,
            frame.len()
        )));
    }

    let headers = String::from_utf8_lossy(&frame[2..2 + header_len]);
    if !headers.lines().any(|line| line.trim() == "Path:audio") {
        return Ok(None);
    }

    let payload = &frame[2 + header_len..];
    Ok((!payload.is_empty()).then_some(payload))
}
