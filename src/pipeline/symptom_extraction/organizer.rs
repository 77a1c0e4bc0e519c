//! Result organizer: four parallel indexes over one list of match records.
//!
//! Buckets hold positions into the owning `matches` vector rather than copies,
//! so every index is a view over the same records. A record appears exactly
//! once per dimension; missing or blank keys go under [`UNKNOWN_KEY`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::MatchRecord;

/// Bucket key for records without a value in a dimension.
pub const UNKNOWN_KEY: &str = "Unknown";

/// The grouping dimensions of an [`OrganizedIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexDimension {
    Symptom,
    Diagnosis,
    Category,
    Code,
}

impl IndexDimension {
    pub fn all() -> &'static [IndexDimension] {
        &[Self::Symptom, Self::Diagnosis, Self::Category, Self::Code]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Diagnosis => "diagnosis",
            Self::Category => "category",
            Self::Code => "code",
        }
    }

    fn key_of<'a>(&self, record: &'a MatchRecord) -> Option<&'a str> {
        match self {
            Self::Symptom => Some(record.phrase.as_str()),
            Self::Diagnosis => record.diagnosis.as_deref(),
            Self::Category => record.diagnostic_category.as_deref(),
            Self::Code => record.diagnosis_code.as_deref(),
        }
    }
}

type Buckets = BTreeMap<String, Vec<usize>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizedIndex {
    pub by_symptom: Buckets,
    pub by_diagnosis: Buckets,
    pub by_category: Buckets,
    pub by_code: Buckets,
}

impl OrganizedIndex {
    /// Add the record at `position` to every dimension.
    pub fn insert(&mut self, position: usize, record: &MatchRecord) {
        for dimension in IndexDimension::all() {
            let key = bucket_key(dimension.key_of(record));
            self.buckets_mut(*dimension).entry(key).or_default().push(position);
        }
    }

    /// Fold a per-note index into this one. `offset` is where the note's
    /// records start in the batch-level `matches` vector.
    pub fn merge(&mut self, other: OrganizedIndex, offset: usize) {
        for dimension in IndexDimension::all() {
            let source = other.buckets(*dimension);
            let target = self.buckets_mut(*dimension);
            for (key, positions) in source {
                target
                    .entry(key.clone())
                    .or_default()
                    .extend(positions.iter().map(|p| p + offset));
            }
        }
    }

    pub fn buckets(&self, dimension: IndexDimension) -> &Buckets {
        match dimension {
            IndexDimension::Symptom => &self.by_symptom,
            IndexDimension::Diagnosis => &self.by_diagnosis,
            IndexDimension::Category => &self.by_category,
            IndexDimension::Code => &self.by_code,
        }
    }

    fn buckets_mut(&mut self, dimension: IndexDimension) -> &mut Buckets {
        match dimension {
            IndexDimension::Symptom => &mut self.by_symptom,
            IndexDimension::Diagnosis => &mut self.by_diagnosis,
            IndexDimension::Category => &mut self.by_category,
            IndexDimension::Code => &mut self.by_code,
        }
    }

    /// Resolve one bucket against the records it indexes.
    pub fn records<'a>(
        &self,
        dimension: IndexDimension,
        key: &str,
        matches: &'a [MatchRecord],
    ) -> Vec<&'a MatchRecord> {
        self.buckets(dimension)
            .get(key)
            .map(|positions| positions.iter().filter_map(|&p| matches.get(p)).collect())
            .unwrap_or_default()
    }

    /// Total entries across all buckets of one dimension.
    pub fn total(&self, dimension: IndexDimension) -> usize {
        self.buckets(dimension).values().map(Vec::len).sum()
    }
}

fn bucket_key(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN_KEY.to_string(),
    }
}

/// Group records by phrase, diagnosis, category and code in one pass.
pub fn organize(matches: &[MatchRecord]) -> OrganizedIndex {
    let mut index = OrganizedIndex::default();
    for (position, record) in matches.iter().enumerate() {
        index.insert(position, record);
    }
    index
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::pipeline::symptom_extraction::types::*;

    fn record(phrase: &str, diagnosis: Option<&str>, category: Option<&str>, code: Option<&str>) -> MatchRecord {
        MatchRecord {
            patient_id: "p1".to_string(),
            note_id: "n1".to_string(),
            vocabulary_id: phrase.to_string(),
            phrase: phrase.to_string(),
            diagnosis: diagnosis.map(str::to_string),
            diagnostic_category: category.map(str::to_string),
            diagnosis_code: code.map(str::to_string),
            kind: VocabularyKind::Symptom,
            match_type: MatchType::SectionContextMatch,
            section_type: SectionType::Default,
            reporting_context: None,
            confidence: SECTION_CONTEXT_CONFIDENCE,
            negated: false,
            service_date: None,
            extraction_version: "v3.2".to_string(),
            extraction_timestamp: Utc::now(),
        }
    }

    fn sample() -> Vec<MatchRecord> {
        vec![
            record("insomnia", Some("Sleep Disorder"), Some("Mental Health"), Some("G47.00")),
            record("anxiety", Some("Anxiety Disorder"), Some("Mental Health"), None),
            record("insomnia", Some("Sleep Disorder"), Some("Mental Health"), Some("G47.00")),
            record("food insecurity", None, Some("  "), None),
        ]
    }

    #[test]
    fn every_record_in_exactly_one_bucket_per_dimension() {
        let matches = sample();
        let index = organize(&matches);
        for dimension in IndexDimension::all() {
            assert_eq!(index.total(*dimension), matches.len(), "dimension {}", dimension.as_str());
        }
    }

    #[test]
    fn groups_by_key() {
        let matches = sample();
        let index = organize(&matches);
        assert_eq!(index.by_symptom["insomnia"], vec![0, 2]);
        assert_eq!(index.by_category["Mental Health"], vec![0, 1, 2]);
        assert_eq!(index.by_diagnosis["Anxiety Disorder"], vec![1]);
    }

    #[test]
    fn missing_and_blank_keys_are_unknown() {
        let matches = sample();
        let index = organize(&matches);
        assert_eq!(index.by_diagnosis[UNKNOWN_KEY], vec![3]);
        assert_eq!(index.by_category[UNKNOWN_KEY], vec![3]);
        assert_eq!(index.by_code[UNKNOWN_KEY], vec![1, 3]);
    }

    #[test]
    fn records_resolves_positions() {
        let matches = sample();
        let index = organize(&matches);
        let insomnia = index.records(IndexDimension::Symptom, "insomnia", &matches);
        assert_eq!(insomnia.len(), 2);
        assert!(insomnia.iter().all(|r| r.phrase == "insomnia"));
        assert!(index.records(IndexDimension::Code, "nope", &matches).is_empty());
    }

    #[test]
    fn incremental_merge_equals_single_pass() {
        let matches = sample();
        let (first, second) = matches.split_at(2);

        let mut merged = OrganizedIndex::default();
        merged.merge(organize(first), 0);
        merged.merge(organize(second), first.len());

        assert_eq!(merged, organize(&matches));
    }

    #[test]
    fn empty_input_empty_index() {
        let index = organize(&[]);
        assert!(index.by_symptom.is_empty());
        assert_eq!(index.total(IndexDimension::Code), 0);
    }
}
