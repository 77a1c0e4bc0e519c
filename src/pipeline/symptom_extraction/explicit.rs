//! Explicit-list extractor: phrases that follow an assertive reporting verb.
//!
//! "patient reports anxiety, fatigue and poor sleep." yields one list with three
//! phrases. Every template runs independently over the whole note, so one
//! sentence may produce several lists. Duplicates across lists are expected.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{ExplicitSymptomList, ReportingContext};

/// A reporting template. Capture group 1 is the object list, up to the sentence end.
struct ReportingTemplate {
    regex: Regex,
    context: ReportingContext,
}

static REPORTING_TEMPLATES: LazyLock<Vec<ReportingTemplate>> = LazyLock::new(|| {
    vec![
        template(
            r"\b(?:patient|client)\s+(?:reports?|complains\s+of|presents\s+with|states?)\s+([^.\n]+)",
            ReportingContext::PatientReport,
        ),
        template(
            r"\breports?\s+(?:experiencing|having|with)\s+([^.\n]+)",
            ReportingContext::ReportExperiencing,
        ),
        template(
            r"\bsymptoms?\s+(?:include|consist\s+of|are|is)\s+([^.\n]+)",
            ReportingContext::SymptomList,
        ),
        template(
            r"\bpresents?\s+with\s+([^.\n]+)",
            ReportingContext::PresentsWith,
        ),
    ]
});

/// Separators inside a captured list: commas and the conjunctions "and" / "or".
static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\band\b|\bor\b").expect("Invalid list separator pattern"));

fn template(regex_str: &str, context: ReportingContext) -> ReportingTemplate {
    ReportingTemplate {
        regex: Regex::new(regex_str).expect("Invalid reporting template pattern"),
        context,
    }
}

/// Split a captured span into candidate phrases.
pub fn split_phrases(raw: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find all explicit symptom lists in a normalized note.
pub fn extract_explicit_lists(normalized_text: &str) -> Vec<ExplicitSymptomList> {
    let mut lists = Vec::new();

    for template in REPORTING_TEMPLATES.iter() {
        for caps in template.regex.captures_iter(normalized_text) {
            let Some(span) = caps.get(1) else { continue };
            let phrases = split_phrases(span.as_str());
            if phrases.is_empty() {
                continue;
            }
            lists.push(ExplicitSymptomList {
                reporting_context: template.context,
                raw_text: span.as_str().trim().to_string(),
                phrases,
            });
        }
    }

    lists
}
