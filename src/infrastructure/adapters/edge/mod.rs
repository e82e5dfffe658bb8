//! Edge read aloud 适配器

mod client;
mod protocol;
mod voice_list;

pub use client::{EdgeSpeechEngine, EdgeSpeechEngineConfig};
