//! Edge Speech Engine - 通过 Edge read aloud 服务合成语音
//!
//! 实现 SpeechEnginePort trait：
//! - 合成：每个文本块一条新的 websocket 连接，按顺序转发音频帧
//! - 音色目录：HTTPS GET

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{stream, SinkExt, StreamExt};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

use super::{protocol, voice_list};
use crate::application::ports::{AudioStream, EngineError, SpeechEnginePort, SpeechRequest};
use crate::domain::speech::{chunk_text, ChunkConfig, VoiceDescriptor, DEFAULT_CHUNK_MAX_BYTES};

type EdgeSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// 音频块通道容量
const AUDIO_CHANNEL_CAPACITY: usize = 16;

/// Edge 引擎配置
#[derive(Debug, Clone)]
pub struct EdgeSpeechEngineConfig {
    pub synthesis_url: String,
    pub voices_url: String,
    pub output_format: String,
    /// 握手、单帧等待与目录请求的超时（秒）
    pub timeout_secs: u64,
    pub chunk_max_bytes: usize,
}

impl Default for EdgeSpeechEngineConfig {
    fn default() -> Self {
        Self {
            synthesis_url: protocol::SYNTHESIS_URL.to_string(),
            voices_url: protocol::VOICES_URL.to_string(),
            output_format: protocol::DEFAULT_OUTPUT_FORMAT.to_string(),
            timeout_secs: 30,
            chunk_max_bytes: DEFAULT_CHUNK_MAX_BYTES,
        }
    }
}

impl EdgeSpeechEngineConfig {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = format.into();
        self
    }

    pub fn with_chunk_max_bytes(mut self, max_bytes: usize) -> Self {
        self.chunk_max_bytes = max_bytes;
        self
    }
}

/// 打开一轮合成所需的参数，可移入后台任务
#[derive(Debug, Clone)]
struct TurnConnector {
    synthesis_url: String,
    output_format: String,
    timeout: Duration,
}

impl TurnConnector {
    /// 建立连接并发送配置与 SSML
    async fn open(&self, text: &str, request: &SpeechRequest) -> Result<EdgeSocket, EngineError> {
        let connection_id = Uuid::new_v4().simple().to_string();
        let mut ws_request = protocol::synthesis_url(&self.synthesis_url, &connection_id)
            .into_client_request()
            .map_err(|e| EngineError::ProtocolError(e.to_string()))?;

        let headers = ws_request.headers_mut();
        headers.insert("Origin", HeaderValue::from_static(protocol::ORIGIN));
        headers.insert("User-Agent", HeaderValue::from_static(protocol::USER_AGENT));
        headers.insert("Pragma", HeaderValue::from_static("no-cache"));
        headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));

        let (mut socket, _) = tokio::time::timeout(self.timeout, connect_async(ws_request))
            .await
            .map_err(|_| EngineError::Timeout)?
            .map_err(|e| {
                EngineError::NetworkError(format!("Cannot connect to speech service: {}", e))
            })?;

        let ssml = protocol::build_ssml(text, &request.voice, &request.prosody);
        socket
            .send(Message::Text(protocol::speech_config_message(&self.output_format)))
            .await
            .map_err(ws_error)?;
        socket
            .send(Message::Text(protocol::ssml_message(
                &Uuid::new_v4().simple().to_string(),
                &ssml,
            )))
            .await
            .map_err(ws_error)?;

        tracing::debug!(connection_id = %connection_id, text_len = text.chars().count(), "Speech turn opened");
        Ok(socket)
    }
}

fn ws_error(e: tungstenite::Error) -> EngineError {
    EngineError::NetworkError(format!("WebSocket error: {}", e))
}

/// Edge 语音合成引擎
pub struct EdgeSpeechEngine {
    http: Client,
    connector: TurnConnector,
    config: EdgeSpeechEngineConfig,
}

impl EdgeSpeechEngine {
    pub fn new(config: EdgeSpeechEngineConfig) -> Result<Self, EngineError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        let connector = TurnConnector {
            synthesis_url: config.synthesis_url.clone(),
            output_format: config.output_format.clone(),
            timeout,
        };

        Ok(Self {
            http,
            connector,
            config,
        })
    }
}

#[async_trait]
impl SpeechEnginePort for EdgeSpeechEngine {
    async fn synthesize(&self, request: SpeechRequest) -> Result<AudioStream, EngineError> {
        let chunks = chunk_text(
            &request.text,
            &ChunkConfig {
                max_bytes: self.config.chunk_max_bytes,
            },
        );
        let total_chunks = chunks.len();
        let mut chunks = chunks.into_iter();
        let first = chunks.next().ok_or(EngineError::NoAudio)?;

        tracing::debug!(
            voice = %request.voice,
            chunks = total_chunks,
            "Sending text to speech service"
        );

        // 首个连接在此建立，握手失败直接返回给调用方
        let socket = self.connector.open(&first, &request).await?;

        let (tx, rx) = mpsc::channel(AUDIO_CHANNEL_CAPACITY);
        tokio::spawn(relay_turns(
            self.connector.clone(),
            socket,
            chunks.collect(),
            request,
            tx,
        ));

        let audio = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })
        .boxed();
        Ok(audio)
    }

    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, EngineError> {
        voice_list::fetch_voices(&self.http, &self.config.voices_url).await
    }
}

/// 依次完成所有文本块的合成
async fn relay_turns(
    connector: TurnConnector,
    mut socket: EdgeSocket,
    remaining: Vec<String>,
    request: SpeechRequest,
    tx: mpsc::Sender<Result<Bytes, EngineError>>,
) {
    let mut remaining = remaining.into_iter();
    let mut turn = 0usize;

    loop {
        match relay_turn(&mut socket, &tx, connector.timeout).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(voice = %request.voice, turn, "Audio receiver dropped, stopping synthesis");
                return;
            }
            Err(e) => {
                tracing::warn!(voice = %request.voice, turn, error = %e, "Speech turn failed");
                let _ = tx.send(Err(e)).await;
                return;
            }
        }
        let _ = socket.close(None).await;
        turn += 1;

        let Some(text) = remaining.next() else {
            tracing::debug!(voice = %request.voice, turns = turn, "Synthesis completed");
            return;
        };

        socket = match connector.open(&text, &request).await {
            Ok(socket) => socket,
            Err(e) => {
                tracing::warn!(voice = %request.voice, turn, error = %e, "Failed to open speech turn");
                let _ = tx.send(Err(e)).await;
                return;
            }
        };
    }
}

/// 转发一轮合成的音频帧，直到 `turn.end`
///
/// 接收端已关闭时返回 `Ok(false)`
async fn relay_turn(
    socket: &mut EdgeSocket,
    tx: &mpsc::Sender<Result<Bytes, EngineError>>,
    idle_timeout: Duration,
) -> Result<bool, EngineError> {
    loop {
        let message = tokio::time::timeout(idle_timeout, socket.next())
            .await
            .map_err(|_| EngineError::Timeout)?;

        match message {
            Some(Ok(Message::Text(text))) if protocol::is_turn_end(&text) => return Ok(true),
            Some(Ok(Message::Binary(frame))) => {
                if let Some(payload) = protocol::audio_payload(&frame)? {
                    if tx.send(Ok(Bytes::copy_from_slice(payload))).await.is_err() {
                        return Ok(false);
                    }
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(EngineError::ProtocolError(
                    "connection closed before turn.end".to_string(),
                ))
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(ws_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::{Prosody, VoiceName};
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    /// 本地服务对单条连接的回放方式
    #[derive(Debug, Clone, Copy)]
    enum Reply {
        /// 一帧音频后发送 turn.end
        Turn,
        /// 一帧音频后直接关闭连接
        CloseEarly,
        /// 持续推送音频直到客户端断开
        Flood,
    }

    fn audio_message(payload: &[u8]) -> Message {
        let headers = "X-RequestId:1\r\nContent-Type:audio/mpeg\r\nPath:audio\r\n";
        let mut frame = (headers.len() as u16).to_be_bytes().to_vec();
        frame.extend_from_slice(headers.as_bytes());
        frame.extend_from_slice(payload);
        Message::Binary(frame)
    }

    /// 启动本地 read aloud 服务
    ///
    /// 第 n 条连接按 `replies[n]` 回放，音频内容为 `[n + 1; 3]`；
    /// 连接在服务端结束时通过返回的通道报告其序号
    async fn spawn_service(replies: Vec<Reply>) -> (String, mpsc::UnboundedReceiver<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}/edge/v1", listener.local_addr().unwrap());
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (index, reply) in replies.into_iter().enumerate() {
                let (tcp, _) = listener.accept().await.unwrap();
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let (mut write, mut read) = accept_async(tcp).await.unwrap().split();
                    // speech.config 与 ssml
                    for _ in 0..2 {
                        read.next().await;
                    }

                    let audio = audio_message(&[index as u8 + 1; 3]);
                    match reply {
                        Reply::Turn => {
                            write.send(audio).await.unwrap();
                            write
                                .send(Message::Text(
                                    "X-RequestId:1\r\nPath:turn.end\r\n\r\n{}".to_string(),
                                ))
                                .await
                                .unwrap();
                        }
                        Reply::CloseEarly => {
                            write.send(audio).await.unwrap();
                            let _ = write.close().await;
                        }
                        Reply::Flood => loop {
                            tokio::select! {
                                message = read.next() => {
                                    if !matches!(message, Some(Ok(_))) {
                                        break;
                                    }
                                }
                                _ = tokio::time::sleep(Duration::from_millis(5)) => {
                                    if write.send(audio.clone()).await.is_err() {
                                        break;
                                    }
                                }
                            }
                        },
                    }
                    let _ = done_tx.send(index);
                });
            }
        });

        (url, done_rx)
    }

    fn local_engine(url: &str) -> EdgeSpeechEngine {
        EdgeSpeechEngine::new(EdgeSpeechEngineConfig {
            synthesis_url: url.to_string(),
            timeout_secs: 5,
            chunk_max_bytes: 256,
            ..Default::default()
        })
        .unwrap()
    }

    /// 以 256 字节分块时恰好切成 `words` 块
    fn speech_request(words: usize) -> SpeechRequest {
        SpeechRequest {
            text: vec!["a".repeat(200); words].join(" "),
            voice: VoiceName::new("ko-KR-SunHiNeural").unwrap(),
            prosody: Prosody::default(),
        }
    }

    #[tokio::test]
    async fn test_turns_relayed_in_order() {
        let (url, _done) = spawn_service(vec![Reply::Turn; 3]).await;
        let audio = local_engine(&url)
            .synthesize(speech_request(3))
            .await
            .unwrap();

        let chunks: Vec<Vec<u8>> = tokio::time::timeout(
            Duration::from_secs(10),
            audio.map(|chunk| chunk.unwrap().to_vec()).collect::<Vec<_>>(),
        )
        .await
        .unwrap();
        assert_eq!(chunks, vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 3]]);
    }

    #[tokio::test]
    async fn test_close_before_turn_end_aborts_stream() {
        let (url, _done) = spawn_service(vec![Reply::Turn, Reply::CloseEarly]).await;
        let audio = local_engine(&url)
            .synthesize(speech_request(2))
            .await
            .unwrap();

        let items: Vec<Result<Bytes, EngineError>> =
            tokio::time::timeout(Duration::from_secs(10), audio.collect::<Vec<_>>())
                .await
                .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().to_vec(), vec![1, 1, 1]);
        assert_eq!(items[1].as_ref().unwrap().to_vec(), vec![2, 2, 2]);
        assert!(matches!(items[2], Err(EngineError::ProtocolError(_))));
    }

    #[tokio::test]
    async fn test_dropped_receiver_stops_relay() {
        let (url, mut done) = spawn_service(vec![Reply::Flood]).await;
        let mut audio = local_engine(&url)
            .synthesize(speech_request(1))
            .await
            .unwrap();

        let first = audio.next().await.unwrap().unwrap();
        assert_eq!(first.to_vec(), vec![1, 1, 1]);
        drop(audio);

        // 中继任务退出后连接被释放，服务端随之结束
        let finished = tokio::time::timeout(Duration::from_secs(10), done.recv())
            .await
            .unwrap();
        assert_eq!(finished, Some(0));
    }

    #[test]
    fn test_config_default() {
        let config = EdgeSpeechEngineConfig::default();
        assert_eq!(config.output_format, "audio-24khz-48kbitrate-mono-mp3");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.chunk_max_bytes, 4096);
    }

    #[test]
    fn test_config_builder() {
        let config = EdgeSpeechEngineConfig::default()
            .with_timeout(5)
            .with_chunk_max_bytes(512)
            .with_output_format("audio-16khz-32kbitrate-mono-mp3");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.chunk_max_bytes, 512);
        assert_eq!(config.output_format, "audio-16khz-32kbitrate-mono-mp3");
    }

    #[tokio::test]
    async fn test_unreachable_service_fails_before_stream() {
        let config = EdgeSpeechEngineConfig {
            synthesis_url: "ws://127.0.0.1:1/edge/v1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let engine = EdgeSpeechEngine::new(config).unwrap();
        let result = engine
            .synthesize(SpeechRequest {
                text: "안녕하세요".to_string(),
                voice: VoiceName::new("ko-KR-SunHiNeural").unwrap(),
                prosody: Prosody::default(),
            })
            .await;
        assert!(matches!(
            result,
            Err(EngineError::NetworkError(_)) | Err(EngineError::Timeout)
        ));
    }
}
