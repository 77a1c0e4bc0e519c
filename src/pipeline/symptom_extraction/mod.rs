//! Section-Aware Symptom Extraction (v3.2)
//!
//! Finds vocabulary phrases in free-text clinical notes and stamps each hit
//! with patient, note, confidence and provenance.
//!
//! ## Architecture
//!
//! ```text
//! Note → normalize → segment → explicit lists ─┐
//!                        │                      ├→ SymptomMatch → MatchRecord → OrganizedIndex
//!                        └→ section scan + negation ┘
//! ```
//!
//! - `BatchRunner` owns the loop: skip, dedup, size guard, per-note failure isolation.
//! - `NoteMatcher` is the strategy seam; `SectionAwareMatcher` is the only strategy.
//! - `MatchStore` is the persistence seam; `InMemoryMatchStore` ships for tests and the CLI.
//! - Explicit-list hits score 0.98, section-context hits 0.92.
//! - Medication, plan and allergy sections are never scanned.

pub mod error;
pub mod types;
pub mod traits;
pub mod normalize;
pub mod sections;
pub mod explicit;
pub mod negation;
pub mod vocabulary;
pub mod metadata;
pub mod matcher;
pub mod organizer;
pub mod runner;
pub mod store;
pub mod report;
pub mod loader;

pub use error::ExtractionError;
pub use types::*;
pub use traits::*;
pub use normalize::normalize;
pub use sections::segment;
pub use explicit::extract_explicit_lists;
pub use negation::{is_negated, is_negated_within};
pub use vocabulary::{CompiledEntry, CompiledVocabulary};
pub use metadata::{section_aware_metadata, EngineMetadata};
pub use matcher::{match_symptoms, SectionAwareMatcher};
pub use organizer::{organize, IndexDimension, OrganizedIndex, UNKNOWN_KEY};
pub use runner::{extract, new_run_id, BatchRunner};
pub use store::InMemoryMatchStore;
pub use report::{ExtractionReport, GroupCount};
pub use loader::{
    load_notes_file, load_notes_json, load_options_file, load_vocabulary_file, load_vocabulary_json,
};
