//! HTTP Middleware
//!
//! 失败响应的访问日志

use axum::{
    extract::Request,
    http::{StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// 需要记录的响应类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Client,
    Server,
}

fn classify(status: StatusCode) -> Option<Failure> {
    if status.is_server_error() {
        Some(Failure::Server)
    } else if status.is_client_error() {
        Some(Failure::Client)
    } else {
        None
    }
}

/// 只记路径与查询串长度
///
/// GET 合成接口把整段待朗读文本放在查询串里，不能原样写进日志
fn log_target(uri: &Uri) -> (String, usize) {
    let query_len = uri.query().map(str::len).unwrap_or(0);
    (uri.path().to_string(), query_len)
}

/// 4xx 记 warn，5xx 记 error
///
/// 错误详情在 ApiError::into_response() 中记录；音频流的耗时只计到响应头
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let (path, query_len) = log_target(request.uri());
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    match classify(status) {
        Some(Failure::Server) => tracing::error!(
            method = %method,
            path = %path,
            query_len,
            status = status.as_u16(),
            latency_ms,
            "Request failed upstream"
        ),
        Some(Failure::Client) => tracing::warn!(
            method = %method,
            path = %path,
            query_len,
            status = status.as_u16(),
            latency_ms,
            "Request rejected"
        ),
        None => {}
    }

    response
}
