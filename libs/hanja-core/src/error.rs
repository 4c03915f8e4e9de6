//! Error types for hanja-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised at the parse/format boundary of the domain types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid grade: {value}")]
    InvalidGrade { value: String },

    #[error("invalid swipe direction: {value}")]
    InvalidDirection { value: String },

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("word {word_id} references unknown character {character_id}")]
    UnknownCharacter {
        word_id: String,
        character_id: String,
    },
}
