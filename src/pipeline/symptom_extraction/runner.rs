//! BatchRunner: orchestrates extraction over a batch of notes.
//!
//! Per note: validate → dedup by (patient, note) → normalize → match → stamp.
//! Runs sequentially; notes share no state besides the merged output, so a
//! failing note is logged, recorded and skipped without touching the rest.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use super::error::ExtractionError;
use super::matcher::SectionAwareMatcher;
use super::metadata::EngineMetadata;
use super::normalize::normalize;
use super::organizer::{organize, OrganizedIndex};
use super::traits::*;
use super::types::*;
use super::vocabulary::CompiledVocabulary;

/// Orchestrates a full extraction run.
pub struct BatchRunner {
    matcher: Box<dyn NoteMatcher>,
    options: ExtractionOptions,
}

impl BatchRunner {
    pub fn new(matcher: Box<dyn NoteMatcher>, options: ExtractionOptions) -> Result<Self, ExtractionError> {
        options.validate()?;
        Ok(Self { matcher, options })
    }

    /// Runner with the section-aware (v3.2) matcher.
    pub fn section_aware(options: ExtractionOptions) -> Result<Self, ExtractionError> {
        Self::new(Box::new(SectionAwareMatcher::new()), options)
    }

    pub fn metadata(&self) -> EngineMetadata {
        self.matcher.metadata()
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extract symptom mentions from every usable note in the batch.
    ///
    /// Never fails: malformed notes are skipped, and notes that fail during
    /// matching are reported in `ExtractionResult::failures`.
    pub fn extract(&self, notes: &[ClinicalNote], vocabulary: &[VocabularyEntry]) -> ExtractionResult {
        let start = Instant::now();
        let run_id = new_run_id();
        let version = self.matcher.metadata().version;
        let timestamp = Utc::now();

        let compiled = CompiledVocabulary::compile(vocabulary, &self.options);
        if compiled.skipped() > 0 {
            tracing::debug!(
                run_id = run_id.as_str(),
                skipped = compiled.skipped(),
                usable = compiled.len(),
                "Vocabulary entries skipped"
            );
        }

        let mut matches: Vec<MatchRecord> = Vec::new();
        let mut organized = self.options.debug.then(OrganizedIndex::default);
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut failures = Vec::new();
        let mut notes_processed = 0u32;
        let mut notes_skipped = 0u32;
        let mut duplicate_notes = 0u32;

        for (position, note) in notes.iter().enumerate() {
            let (Some(patient_id), Some(text)) = (note.patient(), note.body()) else {
                tracing::debug!(position, "Note without patient id or text, skipping");
                notes_skipped += 1;
                continue;
            };
            let note_id = note
                .id()
                .map(str::to_string)
                .unwrap_or_else(|| format!("note-{position}"));

            if !seen.insert((patient_id.to_string(), note_id.clone())) {
                tracing::debug!(patient_id, note_id = note_id.as_str(), "Duplicate note in batch, skipping");
                duplicate_notes += 1;
                continue;
            }

            match self.match_note(&note_id, text, &compiled) {
                Ok(hits) => {
                    let records: Vec<MatchRecord> = hits
                        .into_iter()
                        .map(|hit| {
                            MatchRecord::from_match(hit, patient_id, &note_id, note.service_date, &version, timestamp)
                        })
                        .collect();

                    tracing::debug!(
                        patient_id,
                        note_id = note_id.as_str(),
                        matches = records.len(),
                        "Note processed"
                    );

                    if let Some(index) = organized.as_mut() {
                        index.merge(organize(&records), matches.len());
                    }
                    matches.extend(records);
                    notes_processed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        patient_id,
                        note_id = note_id.as_str(),
                        error = %e,
                        "Failed to process note, continuing with batch"
                    );
                    failures.push(NoteFailure {
                        patient_id: patient_id.to_string(),
                        note_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            run_id = run_id.as_str(),
            version = version.as_str(),
            notes_processed,
            notes_skipped,
            duplicate_notes,
            failures = failures.len(),
            total_extracted = matches.len(),
            duration_ms,
            "Symptom extraction finished"
        );

        ExtractionResult {
            run_id,
            version,
            total_extracted: matches.len(),
            matches,
            organized_index: organized,
            notes_processed,
            notes_skipped,
            duplicate_notes,
            failures,
            duration_ms,
        }
    }

    /// Run a batch and hand the records to a persistence collaborator.
    pub fn run_and_store(
        &self,
        notes: &[ClinicalNote],
        vocabulary: &[VocabularyEntry],
        store: &dyn MatchStore,
    ) -> Result<ExtractionResult, ExtractionError> {
        let result = self.extract(notes, vocabulary);
        if !result.matches.is_empty() {
            store.store_matches(&result.matches)?;
        }
        Ok(result)
    }

    fn match_note(
        &self,
        note_id: &str,
        text: &str,
        vocabulary: &CompiledVocabulary,
    ) -> Result<Vec<SymptomMatch>, ExtractionError> {
        if text.len() > self.options.max_note_bytes {
            return Err(ExtractionError::NoteTooLarge {
                note_id: note_id.to_string(),
                bytes: text.len(),
                limit: self.options.max_note_bytes,
            });
        }
        let normalized = normalize(text);
        self.matcher.match_note(&normalized, vocabulary, &self.options)
    }
}

/// Extract with the section-aware matcher. Fails only on invalid options.
pub fn extract(
    notes: &[ClinicalNote],
    vocabulary: &[VocabularyEntry],
    options: &ExtractionOptions,
) -> Result<ExtractionResult, ExtractionError> {
    let runner = BatchRunner::section_aware(options.clone())?;
    Ok(runner.extract(notes, vocabulary))
}

pub fn new_run_id() -> String {
    Uuid::new_v4().to_string()
}
