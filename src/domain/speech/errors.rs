//! Speech Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text is too long: {actual} characters (max {max})")]
    TextTooLong { max: usize, actual: usize },

    #[error("Invalid voice name: {0}")]
    InvalidVoice(String),

    #[error("Invalid {field} value '{value}': {reason}")]
    InvalidProsody {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}
