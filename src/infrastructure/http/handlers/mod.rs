//! HTTP Handlers

mod health;
mod mcp;
mod tts;
mod voices;

pub use health::*;
pub use mcp::*;
pub use tts::*;
pub use voices::*;
