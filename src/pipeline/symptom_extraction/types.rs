//! Core types for the symptom extraction engine.
//!
//! These types model the full lifecycle:
//! ClinicalNote → Sections + Explicit Lists → SymptomMatch → MatchRecord → OrganizedIndex.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::ExtractionError;
use super::organizer::OrganizedIndex;

/// Confidence assigned to a vocabulary phrase found inside an explicit symptom list.
pub const EXPLICIT_LIST_CONFIDENCE: f32 = 0.98;

/// Confidence assigned to a word-boundary match in section text.
pub const SECTION_CONTEXT_CONFIDENCE: f32 = 0.92;

// ═══════════════════════════════════════════
// Inputs
// ═══════════════════════════════════════════

/// A free-text clinical note supplied by the caller.
///
/// Every field is optional at this level: feeds routinely carry rows with a
/// missing patient or empty text, and those rows are skipped by the runner
/// rather than rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalNote {
    #[serde(default, alias = "patientId")]
    pub patient_id: Option<String>,
    #[serde(default, alias = "noteId")]
    pub note_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "serviceDate")]
    pub service_date: Option<NaiveDate>,
}

impl ClinicalNote {
    pub fn new(patient_id: &str, note_id: &str, text: &str) -> Self {
        Self {
            patient_id: Some(patient_id.to_string()),
            note_id: Some(note_id.to_string()),
            text: Some(text.to_string()),
            service_date: None,
        }
    }

    pub fn with_service_date(mut self, date: NaiveDate) -> Self {
        self.service_date = Some(date);
        self
    }

    /// Patient id, if present and not blank.
    pub fn patient(&self) -> Option<&str> {
        non_blank(self.patient_id.as_deref())
    }

    /// Note text, if present and not blank.
    pub fn body(&self) -> Option<&str> {
        non_blank(self.text.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        non_blank(self.note_id.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whether a vocabulary entry describes a symptom or a problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VocabularyKind {
    #[default]
    #[serde(alias = "symptom")]
    Symptom,
    #[serde(alias = "problem")]
    Problem,
}

impl VocabularyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symptom => "Symptom",
            Self::Problem => "Problem",
        }
    }
}

/// One reference phrase from the symptom vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: String,
    pub phrase: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default, alias = "diagnosticCategory")]
    pub diagnostic_category: Option<String>,
    #[serde(default, alias = "diagnosisCode")]
    pub diagnosis_code: Option<String>,
    #[serde(default)]
    pub kind: VocabularyKind,
}

impl VocabularyEntry {
    pub fn new(id: &str, phrase: &str) -> Self {
        Self {
            id: id.to_string(),
            phrase: phrase.to_string(),
            ..Self::default()
        }
    }

    pub fn with_diagnosis(mut self, diagnosis: &str, category: &str) -> Self {
        self.diagnosis = Some(diagnosis.to_string());
        self.diagnostic_category = Some(category.to_string());
        self
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.diagnosis_code = Some(code.to_string());
        self
    }
}

// ═══════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════

/// Clinical section label assigned by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    ChiefComplaint,
    History,
    Symptoms,
    PhysicalExam,
    Assessment,
    Plan,
    Medication,
    Allergies,
    Default,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChiefComplaint => "chief_complaint",
            Self::History => "history",
            Self::Symptoms => "symptoms",
            Self::PhysicalExam => "physical_exam",
            Self::Assessment => "assessment",
            Self::Plan => "plan",
            Self::Medication => "medication",
            Self::Allergies => "allergies",
            Self::Default => "default",
        }
    }

    /// Sections that are never scanned for symptoms.
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Medication | Self::Plan | Self::Allergies)
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A labelled span of a normalized note. Offsets are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub section_type: SectionType,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

// ═══════════════════════════════════════════
// Explicit symptom lists
// ═══════════════════════════════════════════

/// Which reporting template produced an explicit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingContext {
    PatientReport,
    ReportExperiencing,
    SymptomList,
    PresentsWith,
}

impl ReportingContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatientReport => "patient_report",
            Self::ReportExperiencing => "report_experiencing",
            Self::SymptomList => "symptom_list",
            Self::PresentsWith => "presents_with",
        }
    }
}

/// Phrases captured after a reporting verb, e.g. "patient reports X, Y and Z".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitSymptomList {
    pub reporting_context: ReportingContext,
    pub raw_text: String,
    pub phrases: Vec<String>,
}

// ═══════════════════════════════════════════
// Matches
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExplicitSymptomList,
    SectionContextMatch,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplicitSymptomList => "explicit_symptom_list",
            Self::SectionContextMatch => "section_context_match",
        }
    }
}

/// A vocabulary hit within one note, before it is bound to a patient and stamped.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomMatch {
    pub vocabulary_id: String,
    pub phrase: String,
    pub diagnosis: Option<String>,
    pub diagnostic_category: Option<String>,
    pub diagnosis_code: Option<String>,
    pub kind: VocabularyKind,
    pub match_type: MatchType,
    pub section_type: SectionType,
    pub reporting_context: Option<ReportingContext>,
    pub confidence: f32,
}

/// The engine's principal output unit: one per (note, vocabulary entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub patient_id: String,
    pub note_id: String,
    pub vocabulary_id: String,
    pub phrase: String,
    pub diagnosis: Option<String>,
    pub diagnostic_category: Option<String>,
    pub diagnosis_code: Option<String>,
    pub kind: VocabularyKind,
    pub match_type: MatchType,
    pub section_type: SectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_context: Option<ReportingContext>,
    pub confidence: f32,
    /// Always false: negated mentions are suppressed, not emitted.
    pub negated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    pub extraction_version: String,
    pub extraction_timestamp: DateTime<Utc>,
}

impl MatchRecord {
    pub fn from_match(
        hit: SymptomMatch,
        patient_id: &str,
        note_id: &str,
        service_date: Option<NaiveDate>,
        version: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            note_id: note_id.to_string(),
            vocabulary_id: hit.vocabulary_id,
            phrase: hit.phrase,
            diagnosis: hit.diagnosis,
            diagnostic_category: hit.diagnostic_category,
            diagnosis_code: hit.diagnosis_code,
            kind: hit.kind,
            match_type: hit.match_type,
            section_type: hit.section_type,
            reporting_context: hit.reporting_context,
            confidence: hit.confidence,
            negated: false,
            service_date,
            extraction_version: version.to_string(),
            extraction_timestamp: timestamp,
        }
    }
}

// ═══════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════

/// Options recognised by the extraction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Reserved for intensity measurement. Dedup is per vocabulary id per note regardless.
    #[serde(alias = "preserveDuplicates")]
    pub preserve_duplicates: bool,
    /// Build the four-way organized index alongside the flat match list.
    pub debug: bool,
    /// Wrap vocabulary phrases in `\b` when scanning section text.
    #[serde(alias = "useWordBoundaries")]
    pub use_word_boundaries: bool,
    /// Suppress section matches preceded by a negation cue.
    #[serde(alias = "considerNegation")]
    pub consider_negation: bool,
    /// Vocabulary phrases shorter than this (in chars) are never matched.
    #[serde(alias = "minPhraseLength")]
    pub min_phrase_length: usize,
    /// Characters inspected before a phrase when looking for negation cues.
    #[serde(alias = "negationWindow")]
    pub negation_window: usize,
    /// Notes longer than this (in bytes) fail individually.
    #[serde(alias = "maxNoteBytes")]
    pub max_note_bytes: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            preserve_duplicates: true,
            debug: false,
            use_word_boundaries: true,
            consider_negation: true,
            min_phrase_length: 3,
            negation_window: 50,
            max_note_bytes: 1_000_000,
        }
    }
}

impl ExtractionOptions {
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.min_phrase_length == 0 {
            return Err(ExtractionError::Config(
                "min_phrase_length must be at least 1".to_string(),
            ));
        }
        if self.negation_window == 0 {
            return Err(ExtractionError::Config(
                "negation_window must be at least 1".to_string(),
            ));
        }
        if self.max_note_bytes == 0 {
            return Err(ExtractionError::Config(
                "max_note_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Batch Result (output of BatchRunner)
// ═══════════════════════════════════════════

/// A note that failed during matching. The rest of the batch is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteFailure {
    pub patient_id: String,
    pub note_id: String,
    pub error: String,
}

/// Result of running extraction over a batch of notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub run_id: String,
    pub version: String,
    pub matches: Vec<MatchRecord>,
    /// Present only when `ExtractionOptions::debug` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organized_index: Option<OrganizedIndex>,
    pub total_extracted: usize,
    pub notes_processed: u32,
    pub notes_skipped: u32,
    pub duplicate_notes: u32,
    pub failures: Vec<NoteFailure>,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_sections() {
        assert!(SectionType::Medication.is_excluded());
        assert!(SectionType::Plan.is_excluded());
        assert!(SectionType::Allergies.is_excluded());
        assert!(!SectionType::History.is_excluded());
        assert!(!SectionType::Default.is_excluded());
    }

    #[test]
    fn section_type_display() {
        assert_eq!(SectionType::ChiefComplaint.to_string(), "chief_complaint");
        assert_eq!(SectionType::PhysicalExam.to_string(), "physical_exam");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let note = ClinicalNote {
            patient_id: Some("  ".to_string()),
            note_id: Some("n1".to_string()),
            text: Some("".to_string()),
            service_date: None,
        };
        assert_eq!(note.patient(), None);
        assert_eq!(note.body(), None);
        assert_eq!(note.id(), Some("n1"));
    }

    #[test]
    fn note_accepts_camel_case_fields() {
        let note: ClinicalNote = serde_json::from_str(
            r#"{"patientId": "p1", "noteId": "n1", "text": "cough", "serviceDate": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(note.patient(), Some("p1"));
        assert_eq!(note.id(), Some("n1"));
        assert_eq!(note.service_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn vocabulary_kind_defaults_to_symptom() {
        let entry: VocabularyEntry =
            serde_json::from_str(r#"{"id": "1", "phrase": "fatigue"}"#).unwrap();
        assert_eq!(entry.kind, VocabularyKind::Symptom);
        assert!(entry.diagnosis.is_none());
    }

    #[test]
    fn default_options() {
        let options = ExtractionOptions::default();
        assert!(options.preserve_duplicates);
        assert!(!options.debug);
        assert!(options.use_word_boundaries);
        assert!(options.consider_negation);
        assert_eq!(options.min_phrase_length, 3);
        assert_eq!(options.negation_window, 50);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn partial_options_json_fills_defaults() {
        let options: ExtractionOptions =
            serde_json::from_str(r#"{"debug": true, "considerNegation": false}"#).unwrap();
        assert!(options.debug);
        assert!(!options.consider_negation);
        assert!(options.use_word_boundaries);
        assert_eq!(options.min_phrase_length, 3);
    }

    #[test]
    fn zero_min_phrase_length_rejected() {
        let options = ExtractionOptions {
            min_phrase_length: 0,
            ..ExtractionOptions::default()
        };
        assert!(matches!(options.validate(), Err(ExtractionError::Config(_))));
    }

    #[test]
    fn match_record_serializes_snake_case() {
        let hit = SymptomMatch {
            vocabulary_id: "1".to_string(),
            phrase: "cough".to_string(),
            diagnosis: None,
            diagnostic_category: None,
            diagnosis_code: None,
            kind: VocabularyKind::Symptom,
            match_type: MatchType::ExplicitSymptomList,
            section_type: SectionType::Default,
            reporting_context: Some(ReportingContext::PatientReport),
            confidence: EXPLICIT_LIST_CONFIDENCE,
        };
        let record = MatchRecord::from_match(hit, "p1", "n1", None, "v3.2", Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"match_type\":\"explicit_symptom_list\""));
        assert!(json.contains("\"reporting_context\":\"patient_report\""));
        assert!(json.contains("\"negated\":false"));
        assert!(!json.contains("service_date"));
    }
}
