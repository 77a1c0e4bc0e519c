//! Core matcher: sections × vocabulary, explicit lists first.
//!
//! For every scannable section and every vocabulary entry not yet matched in
//! this note:
//! 1. Explicit list: if a phrase captured after a reporting verb contains the
//!    vocabulary phrase (or the reverse), emit at 0.98. Never negation-checked.
//! 2. Section text: word-boundary search in the section, negation check, emit
//!    at 0.92. A negated hit is dropped for this section only; the entry can
//!    still match in a later section.
//!
//! The matched-id set lives for one note and is discarded with it.

use std::collections::HashSet;

use super::error::ExtractionError;
use super::explicit::extract_explicit_lists;
use super::metadata::{section_aware_metadata, EngineMetadata};
use super::negation::is_negated_within;
use super::sections::segment;
use super::traits::NoteMatcher;
use super::types::*;
use super::vocabulary::{CompiledEntry, CompiledVocabulary};

/// Section-aware matcher with explicit-list priority and negation detection.
pub struct SectionAwareMatcher;

impl SectionAwareMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SectionAwareMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteMatcher for SectionAwareMatcher {
    fn metadata(&self) -> EngineMetadata {
        section_aware_metadata()
    }

    fn match_note(
        &self,
        normalized_text: &str,
        vocabulary: &CompiledVocabulary,
        options: &ExtractionOptions,
    ) -> Result<Vec<SymptomMatch>, ExtractionError> {
        Ok(match_compiled(normalized_text, vocabulary, options))
    }
}

/// Match a normalized note against a raw vocabulary.
/// Convenience wrapper that compiles the vocabulary for a single call.
pub fn match_symptoms(
    normalized_text: &str,
    vocabulary: &[VocabularyEntry],
    options: &ExtractionOptions,
) -> Vec<SymptomMatch> {
    let compiled = CompiledVocabulary::compile(vocabulary, options);
    match_compiled(normalized_text, &compiled, options)
}

fn match_compiled(
    normalized_text: &str,
    vocabulary: &CompiledVocabulary,
    options: &ExtractionOptions,
) -> Vec<SymptomMatch> {
    let mut sections = segment(normalized_text);
    if sections.is_empty() {
        sections.push(Section {
            section_type: SectionType::Default,
            text: normalized_text.to_string(),
            start_offset: 0,
            end_offset: normalized_text.len(),
        });
    }

    let explicit_lists = extract_explicit_lists(normalized_text);
    let mut matched_ids: HashSet<&str> = HashSet::new();
    let mut matches = Vec::new();

    for section in sections.iter().filter(|s| !s.section_type.is_excluded()) {
        for entry in vocabulary.entries() {
            if matched_ids.contains(entry.id()) {
                continue;
            }

            if let Some(list) = find_in_explicit_lists(entry, &explicit_lists) {
                matches.push(build_match(
                    entry,
                    MatchType::ExplicitSymptomList,
                    section.section_type,
                    Some(list.reporting_context),
                    EXPLICIT_LIST_CONFIDENCE,
                ));
                matched_ids.insert(entry.id());
                continue;
            }

            if !entry.found_in(&section.text) {
                continue;
            }

            if options.consider_negation
                && is_negated_within(&section.text, &entry.phrase_lower, options.negation_window)
            {
                tracing::trace!(
                    vocabulary_id = entry.id(),
                    section = section.section_type.as_str(),
                    "Negated mention suppressed"
                );
                continue;
            }

            matches.push(build_match(
                entry,
                MatchType::SectionContextMatch,
                section.section_type,
                None,
                SECTION_CONTEXT_CONFIDENCE,
            ));
            matched_ids.insert(entry.id());
        }
    }

    matches
}

/// First explicit list with a phrase that overlaps the vocabulary phrase.
///
/// Containment is checked both ways: the listed phrase may contain the
/// vocabulary phrase or be contained in it.
fn find_in_explicit_lists<'a>(
    entry: &CompiledEntry,
    lists: &'a [ExplicitSymptomList],
) -> Option<&'a ExplicitSymptomList> {
    let phrase = entry.phrase_lower.as_str();
    lists.iter().find(|list| {
        list.phrases
            .iter()
            .any(|listed| listed.contains(phrase) || phrase.contains(listed.as_str()))
    })
}

fn build_match(
    entry: &CompiledEntry,
    match_type: MatchType,
    section_type: SectionType,
    reporting_context: Option<ReportingContext>,
    confidence: f32,
) -> SymptomMatch {
    SymptomMatch {
        vocabulary_id: entry.entry.id.clone(),
        phrase: entry.entry.phrase.clone(),
        diagnosis: entry.entry.diagnosis.clone(),
        diagnostic_category: entry.entry.diagnostic_category.clone(),
        diagnosis_code: entry.entry.diagnosis_code.clone(),
        kind: entry.entry.kind,
        match_type,
        section_type,
        reporting_context,
        confidence,
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
