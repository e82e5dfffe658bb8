//! 文本分块器
//!
//! 合成引擎对单条 SSML 消息有大小限制，长文本需要切成多块依次合成。
//! 尺寸按 XML 转义后的 UTF-8 字节数计算，尽量在空白或标点处切分。

/// 默认单块最大字节数
pub const DEFAULT_CHUNK_MAX_BYTES: usize = 4096;

/// 分块配置
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// 单块最大字节数（转义后）
    pub max_bytes: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_CHUNK_MAX_BYTES,
        }
    }
}

/// 句末标点
#[inline]
fn is_strong_delimiter(ch: char) -> bool {
    matches!(ch, '。' | '？' | '！' | '.' | '?' | '!')
}

/// 逗号等
#[inline]
fn is_weak_delimiter(ch: char) -> bool {
    matches!(ch, '，' | '；' | '：' | ',' | ';' | ':')
}

/// 切分点：切在该字符之后
#[inline]
fn is_break(ch: char) -> bool {
    ch.is_whitespace() || is_strong_delimiter(ch) || is_weak_delimiter(ch)
}

/// 字符转义后的字节数
#[inline]
fn escaped_len(ch: char) -> usize {
    match ch {
        '&' => 5,
        '<' | '>' => 4,
        '"' | '\'' => 6,
        _ => ch.len_utf8(),
    }
}

fn escaped_cost(s: &str) -> usize {
    s.chars().map(escaped_len).sum()
}

fn push_trimmed(chunks: &mut Vec<String>, s: &str) {
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// 将文本切成不超过 `max_bytes` 的块
///
/// 超限时回退到块内最后一个切分点；块内没有切分点时在字符边界硬切
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_cost = 0;
    // current 中最后一个切分点之后的字节位置
    let mut last_break: Option<usize> = None;

    for ch in text.chars() {
        let cost = escaped_len(ch);

        while !current.is_empty() && current_cost + cost > config.max_bytes {
            let split_at = last_break
                .filter(|&i| i > 0 && i < current.len())
                .unwrap_or(current.len());
            let rest = current.split_off(split_at);
            push_trimmed(&mut chunks, &current);

            current = rest;
            current_cost = escaped_cost(&current);
            last_break = None;
        }

        current.push(ch);
        current_cost += cost;
        if is_break(ch) {
            last_break = Some(current.len());
        }
    }

    push_trimmed(&mut chunks, &current);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_bytes: usize) -> ChunkConfig {
        ChunkConfig { max_bytes }
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk_text("안녕하세요", &ChunkConfig::default());
        assert_eq!(chunks, vec!["안녕하세요".to_string()]);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(chunk_text("   ", &config(16)).is_empty());
    }

    #[test]
    fn test_splits_on_whitespace() {
        // 每个韩文字 3 字节
        let chunks = chunk_text("가나다 라마바 사아자", &config(21));
        assert_eq!(chunks, vec!["가나다 라마바", "사아자"]);
    }

    #[test]
    fn test_prefers_punctuation() {
        let chunks = chunk_text("hello,world again", &config(12));
        assert_eq!(chunks[0], "hello,world");
        assert_eq!(chunks[1], "again");
    }

    #[test]
    fn test_hard_split_without_breaks() {
        let text = "가".repeat(10);
        let chunks = chunk_text(&text, &config(9));
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.len() <= 9));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_escaped_size_respected() {
        let text = "a&b&c&d&e&f";
        let chunks = chunk_text(text, &config(12));
        for chunk in &chunks {
            assert!(escaped_cost(chunk) <= 12, "{chunk}");
        }
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_long_korean_text_all_chunks_within_limit() {
        let sentence = "오늘은 날씨가 정말 좋네요. ";
        let text = sentence.repeat(400);
        let chunks = chunk_text(&text, &ChunkConfig::default());

        let words = ["오늘은", "날씨가", "정말", "좋네요."];
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(escaped_cost(chunk) <= DEFAULT_CHUNK_MAX_BYTES);
            // 只在词边界切分
            assert!(chunk.split_whitespace().all(|w| words.contains(&w)), "{chunk}");
        }
    }
}
