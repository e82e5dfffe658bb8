//! 合成前的文本整理
//!
//! 换行转成停顿，使朗读时段落之间有自然的间隔

use once_cell::sync::Lazy;
use regex::Regex;

static DOT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(?:\s*\.)+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 整理文本
///
/// 1. 三个换行 -> ` ... `，两个 -> ` .. `，一个 -> ` . `
/// 2. 连续句点（可夹空白）一律收敛为 ` .. `，包括第 1 步产生的 ` ... `
/// 3. 连续空白压缩为一个空格
pub fn preprocess_text(text: &str) -> String {
    let normalized = text.trim().replace("\r\n", "\n");

    let paused = normalized
        .replace("\n\n\n", " ... ")
        .replace("\n\n", " .. ")
        .replace('\n', " . ");

    let dots = DOT_RUN.replace_all(&paused, " .. ");

    WHITESPACE.replace_all(&dots, " ").trim().to_string()
}
