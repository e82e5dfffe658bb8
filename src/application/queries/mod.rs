//! 应用层 - 查询（读操作）
//!
//! 音色目录与音色名称校验

mod voice_queries;

pub mod handlers;

pub use voice_queries::*;
