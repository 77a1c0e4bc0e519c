//! Summary report: grouped counts per symptom, diagnosis, category and code.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::organizer::{organize, IndexDimension};
use super::types::{ExtractionResult, MatchRecord, NoteFailure};

/// Count of records (and distinct patients) under one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub records: usize,
    pub patients: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub run_id: String,
    pub version: String,
    pub total_extracted: usize,
    pub notes_processed: u32,
    pub notes_skipped: u32,
    pub duplicate_notes: u32,
    pub failures: Vec<NoteFailure>,
    pub by_symptom: Vec<GroupCount>,
    pub by_diagnosis: Vec<GroupCount>,
    pub by_category: Vec<GroupCount>,
    pub by_code: Vec<GroupCount>,
}

impl ExtractionReport {
    /// Build from a finished run. Reuses the organized index when the run was in debug mode.
    pub fn from_result(result: &ExtractionResult) -> Self {
        let index = match &result.organized_index {
            Some(index) => index.clone(),
            None => organize(&result.matches),
        };

        let group = |dimension: IndexDimension| -> Vec<GroupCount> {
            let mut groups: Vec<GroupCount> = index
                .buckets(dimension)
                .iter()
                .map(|(key, positions)| {
                    let records: Vec<&MatchRecord> =
                        positions.iter().filter_map(|&p| result.matches.get(p)).collect();
                    let patients: HashSet<&str> = records.iter().map(|r| r.patient_id.as_str()).collect();
                    GroupCount {
                        key: key.clone(),
                        records: records.len(),
                        patients: patients.len(),
                    }
                })
                .collect();
            groups.sort_by(|a, b| b.records.cmp(&a.records).then_with(|| a.key.cmp(&b.key)));
            groups
        };

        Self {
            run_id: result.run_id.clone(),
            version: result.version.clone(),
            total_extracted: result.total_extracted,
            notes_processed: result.notes_processed,
            notes_skipped: result.notes_skipped,
            duplicate_notes: result.duplicate_notes,
            failures: result.failures.clone(),
            by_symptom: group(IndexDimension::Symptom),
            by_diagnosis: group(IndexDimension::Diagnosis),
            by_category: group(IndexDimension::Category),
            by_code: group(IndexDimension::Code),
        }
    }

    /// Plain structured text for operators.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Symptom extraction report ({})", self.version);
        let _ = writeln!(out, "Run: {}", self.run_id);
        let _ = writeln!(
            out,
            "Notes: {} processed, {} skipped, {} duplicate, {} failed",
            self.notes_processed,
            self.notes_skipped,
            self.duplicate_notes,
            self.failures.len()
        );
        let _ = writeln!(out, "Total matches: {}", self.total_extracted);

        for (title, groups) in [
            ("By symptom", &self.by_symptom),
            ("By diagnosis", &self.by_diagnosis),
            ("By category", &self.by_category),
            ("By code", &self.by_code),
        ] {
            if groups.is_empty() {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{title}:");
            for g in groups {
                let _ = writeln!(
                    out,
                    "  {}: {} {}, {} {}",
                    g.key,
                    g.records,
                    plural(g.records, "match", "matches"),
                    g.patients,
                    plural(g.patients, "patient", "patients"),
                );
            }
        }

        if !self.failures.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Failures:");
            for f in &self.failures {
                let _ = writeln!(out, "  {}/{}: {}", f.patient_id, f.note_id, f.error);
            }
        }

        out
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
