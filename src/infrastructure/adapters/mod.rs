//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod edge;
pub mod romanize;

mod fake_speech_engine;

pub use edge::{EdgeSpeechEngine, EdgeSpeechEngineConfig};
pub use fake_speech_engine::{FakeSpeechEngine, FakeSpeechEngineConfig};
pub use romanize::{HttpRomanizeClient, HttpRomanizeClientConfig};
