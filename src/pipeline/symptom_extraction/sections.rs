//! Section segmenter: splits a normalized note into labelled clinical sections.
//!
//! Headers are detected by pattern, not by layout: normalized text has no line
//! structure left. Several spellings map to one section type. When headers
//! overlap ("past medical history:" contains "history:") the earliest, longest
//! header wins and the nested one is ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Section, SectionType};

/// Header label → section type, in lookup order. Labels are lowercase (input is normalized).
const SECTION_HEADERS: &[(&str, SectionType)] = &[
    ("chief complaint:", SectionType::ChiefComplaint),
    ("cc:", SectionType::ChiefComplaint),
    ("reason for visit:", SectionType::ChiefComplaint),
    ("history of present illness:", SectionType::History),
    ("past medical history:", SectionType::History),
    ("history:", SectionType::History),
    ("hpi:", SectionType::History),
    ("pmh:", SectionType::History),
    ("symptoms:", SectionType::Symptoms),
    ("review of systems:", SectionType::Symptoms),
    ("ros:", SectionType::Symptoms),
    ("physical examination:", SectionType::PhysicalExam),
    ("physical exam:", SectionType::PhysicalExam),
    ("exam:", SectionType::PhysicalExam),
    ("assessment:", SectionType::Assessment),
    ("impression:", SectionType::Assessment),
    ("diagnosis:", SectionType::Assessment),
    ("treatment plan:", SectionType::Plan),
    ("plan:", SectionType::Plan),
    ("recommendations:", SectionType::Plan),
    ("current medications:", SectionType::Medication),
    ("medications:", SectionType::Medication),
    ("medication:", SectionType::Medication),
    ("meds:", SectionType::Medication),
    ("allergies:", SectionType::Allergies),
    ("allergy:", SectionType::Allergies),
];

static HEADER_PATTERNS: LazyLock<Vec<(Regex, SectionType)>> = LazyLock::new(|| {
    SECTION_HEADERS
        .iter()
        .map(|(label, section_type)| {
            let regex = Regex::new(&format!(r"\b{}", regex::escape(label)))
                .expect("Invalid section header pattern");
            (regex, *section_type)
        })
        .collect()
});

/// A header occurrence: byte range of the label and the section it opens.
#[derive(Debug, Clone, Copy)]
struct HeaderHit {
    start: usize,
    end: usize,
    section_type: SectionType,
}

fn find_headers(text: &str) -> Vec<HeaderHit> {
    let mut hits: Vec<HeaderHit> = HEADER_PATTERNS
        .iter()
        .flat_map(|(regex, section_type)| {
            regex.find_iter(text).map(move |m| HeaderHit {
                start: m.start(),
                end: m.end(),
                section_type: *section_type,
            })
        })
        .collect();

    hits.sort_by_key(|h| (h.start, std::cmp::Reverse(h.end)));

    let mut kept: Vec<HeaderHit> = Vec::with_capacity(hits.len());
    for hit in hits {
        match kept.last() {
            Some(prev) if hit.start < prev.end => {}
            _ => kept.push(hit),
        }
    }
    kept
}

/// Split normalized text into sections.
///
/// Returns an empty list when no header is found; the caller decides how to
/// treat unstructured notes. Text ahead of the first header belongs to no
/// section and is not scanned.
pub fn segment(normalized_text: &str) -> Vec<Section> {
    let headers = find_headers(normalized_text);
    if headers.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::with_capacity(headers.len());

    for (i, hit) in headers.iter().enumerate() {
        let end = headers
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(normalized_text.len());
        sections.push(Section {
            section_type: hit.section_type,
            text: normalized_text[hit.end..end].trim().to_string(),
            start_offset: hit.end,
            end_offset: end,
        });
    }

    sections
}
