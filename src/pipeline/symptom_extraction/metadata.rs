//! Static engine metadata, exposed so callers can list algorithm versions side by side.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::negation::DEFAULT_NEGATION_WINDOW;
use super::types::{EXPLICIT_LIST_CONFIDENCE, SECTION_CONTEXT_CONFIDENCE};
use crate::config::ENGINE_VERSION;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineMetadata {
    pub version: String,
    pub name: String,
    pub description: String,
    pub release_date: String,
    pub features: Vec<String>,
    pub parameters: BTreeMap<String, String>,
}

/// Metadata of the section-aware matcher.
pub fn section_aware_metadata() -> EngineMetadata {
    let features = [
        "Section-aware scanning with medication, plan and allergy sections excluded",
        "Explicit symptom lists after reporting verbs take priority",
        "Word-boundary phrase matching with substring fallback",
        "Look-behind negation with reporting-cue override",
        "One match per vocabulary entry per note",
        "Grouping by symptom, diagnosis, category and code",
    ];

    let parameters = [
        ("min_phrase_length", "3".to_string()),
        ("negation_window", DEFAULT_NEGATION_WINDOW.to_string()),
        ("explicit_list_confidence", EXPLICIT_LIST_CONFIDENCE.to_string()),
        ("section_context_confidence", SECTION_CONTEXT_CONFIDENCE.to_string()),
        ("excluded_sections", "medication,plan,allergies".to_string()),
    ];

    EngineMetadata {
        version: ENGINE_VERSION.to_string(),
        name: "Section-Aware Symptom Matcher".to_string(),
        description: "Matches reference symptom phrases in clinical notes using section \
                      context, explicit reporting lists and negation detection."
            .to_string(),
        release_date: "2025-04-15".to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        parameters: parameters
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    }
}
