//! Trait definitions for the symptom extraction engine.
//!
//! Two traits define the module boundaries:
//! - NoteMatcher: the matching strategy applied to one normalized note
//! - MatchStore: where emitted match records go after a batch

use super::error::ExtractionError;
use super::metadata::EngineMetadata;
use super::types::*;
use super::vocabulary::CompiledVocabulary;

/// A symptom matching strategy. One implementation per engine version.
pub trait NoteMatcher: Send + Sync {
    /// Version and feature description of this strategy.
    fn metadata(&self) -> EngineMetadata;

    /// Match a single normalized note against the compiled vocabulary.
    /// Must return at most one match per vocabulary id.
    fn match_note(
        &self,
        normalized_text: &str,
        vocabulary: &CompiledVocabulary,
        options: &ExtractionOptions,
    ) -> Result<Vec<SymptomMatch>, ExtractionError>;
}

/// Persistence collaborator for emitted records.
pub trait MatchStore: Send + Sync {
    /// Store all records from one extraction run.
    fn store_matches(&self, records: &[MatchRecord]) -> Result<(), ExtractionError>;

    /// Number of records stored so far.
    fn stored_count(&self) -> Result<usize, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify traits are object-safe (can be used as `dyn Trait`)
    #[test]
    fn traits_are_object_safe() {
        fn _assert_matcher(_: &dyn NoteMatcher) {}
        fn _assert_store(_: &dyn MatchStore) {}
    }
}
