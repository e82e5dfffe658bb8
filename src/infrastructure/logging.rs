//! 日志初始化
//!
//! `RUST_LOG` 优先，否则使用配置中的级别

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 默认过滤规则
fn default_filter(config: &LogConfig) -> String {
    format!(
        "{},voicegate={},tower_http=debug",
        config.level, config.level
    )
}

/// 初始化全局 tracing subscriber
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
