//! Error types for the symptom extraction engine.
//!
//! Only argument and configuration errors ever reach the caller of
//! `BatchRunner::extract`. Everything else is contained per note.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Note {note_id} is {bytes} bytes, limit is {limit}")]
    NoteTooLarge {
        note_id: String,
        bytes: usize,
        limit: usize,
    },

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<serde_json::Error> for ExtractionError {
    fn from(e: serde_json::Error) -> Self {
        Self::JsonParsing(e.to_string())
    }
}
