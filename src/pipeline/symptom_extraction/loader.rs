//! JSON loaders for notes, vocabulary and options.
//!
//! Inputs are arrays of objects. Rows that do not deserialize are skipped
//! with a debug log, matching how the runner treats unusable notes; only a
//! non-array top level is an error.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::error::ExtractionError;
use super::types::{ClinicalNote, ExtractionOptions, VocabularyEntry};

pub fn load_notes_json(json: &str) -> Result<Vec<ClinicalNote>, ExtractionError> {
    load_rows(json, "notes")
}

pub fn load_vocabulary_json(json: &str) -> Result<Vec<VocabularyEntry>, ExtractionError> {
    load_rows(json, "vocabulary")
}

pub fn load_notes_file(path: &Path) -> Result<Vec<ClinicalNote>, ExtractionError> {
    load_notes_json(&std::fs::read_to_string(path)?)
}

pub fn load_vocabulary_file(path: &Path) -> Result<Vec<VocabularyEntry>, ExtractionError> {
    load_vocabulary_json(&std::fs::read_to_string(path)?)
}

/// Options file: a single object, missing keys take their defaults. Validated on load.
pub fn load_options_file(path: &Path) -> Result<ExtractionOptions, ExtractionError> {
    let content = std::fs::read_to_string(path)?;
    let options: ExtractionOptions = serde_json::from_str(&content)?;
    options.validate()?;
    Ok(options)
}

fn load_rows<T: DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, ExtractionError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(rows) = value else {
        return Err(ExtractionError::InvalidArgument(format!(
            "{what} must be a JSON array"
        )));
    };

    let mut loaded = Vec::with_capacity(rows.len());
    for (position, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<T>(row) {
            Ok(item) => loaded.push(item),
            Err(e) => {
                tracing::debug!(kind = what, position, error = %e, "Skipping malformed row");
            }
        }
    }
    Ok(loaded)
}
