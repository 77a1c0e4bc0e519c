//! Compiled vocabulary: validated entries with their phrase patterns built once.
//!
//! A batch reuses the same vocabulary for every note, so word-boundary regexes
//! are compiled up front instead of per note and per section.

use regex::Regex;

use super::normalize::normalize;
use super::types::{ExtractionOptions, VocabularyEntry};

/// A vocabulary entry ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledEntry {
    pub entry: VocabularyEntry,
    /// Normalized (lowercase, single-spaced) phrase.
    pub phrase_lower: String,
    /// Word-boundary pattern. `None` means plain substring search.
    pattern: Option<Regex>,
}

impl CompiledEntry {
    fn compile(entry: &VocabularyEntry, use_word_boundaries: bool) -> Self {
        let phrase_lower = normalize(&entry.phrase);
        let pattern = if use_word_boundaries {
            match Regex::new(&word_boundary_pattern(&phrase_lower)) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::debug!(
                        vocabulary_id = entry.id.as_str(),
                        error = %e,
                        "Phrase pattern rejected, falling back to substring search"
                    );
                    None
                }
            }
        } else {
            None
        };

        Self {
            entry: entry.clone(),
            phrase_lower,
            pattern,
        }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }

    /// Whether the phrase occurs in `text` (normalized).
    pub fn found_in(&self, text: &str) -> bool {
        match &self.pattern {
            Some(regex) => regex.is_match(text),
            None => text.contains(&self.phrase_lower),
        }
    }
}

/// `\b` is only meaningful next to a word character; a phrase such as
/// "pain (chronic)" gets a boundary on its leading edge only.
fn word_boundary_pattern(phrase: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(phrase.chars().next()) { r"\b" } else { "" };
    let trail = if is_word(phrase.chars().last()) { r"\b" } else { "" };
    format!("{lead}{}{trail}", regex::escape(phrase))
}

/// The usable part of a vocabulary, in input order.
#[derive(Debug, Clone, Default)]
pub struct CompiledVocabulary {
    entries: Vec<CompiledEntry>,
    skipped: usize,
}

impl CompiledVocabulary {
    /// Validate and compile. Entries with a blank id, or a phrase shorter than
    /// `options.min_phrase_length` characters, are skipped.
    pub fn compile(vocabulary: &[VocabularyEntry], options: &ExtractionOptions) -> Self {
        let mut entries = Vec::with_capacity(vocabulary.len());
        let mut skipped = 0;

        for entry in vocabulary {
            if entry.id.trim().is_empty() {
                tracing::debug!(phrase = entry.phrase.as_str(), "Vocabulary entry without id, skipping");
                skipped += 1;
                continue;
            }
            let compiled = CompiledEntry::compile(entry, options.use_word_boundaries);
            if compiled.phrase_lower.chars().count() < options.min_phrase_length {
                tracing::debug!(
                    vocabulary_id = entry.id.as_str(),
                    min_phrase_length = options.min_phrase_length,
                    "Vocabulary phrase too short, skipping"
                );
                skipped += 1;
                continue;
            }
            entries.push(compiled);
        }

        Self { entries, skipped }
    }

    pub fn entries(&self) -> &[CompiledEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of input entries rejected during compilation.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_one(phrase: &str, use_word_boundaries: bool) -> CompiledEntry {
        CompiledEntry::compile(&VocabularyEntry::new("1", phrase), use_word_boundaries)
    }

    #[test]
    fn word_boundaries_reject_partial_words() {
        let entry = compile_one("pain", true);
        assert!(entry.found_in("chest pain today"));
        assert!(!entry.found_in("painting class"));
    }

    #[test]
    fn substring_mode_accepts_partial_words() {
        let entry = compile_one("pain", false);
        assert!(entry.found_in("painting class"));
    }

    #[test]
    fn phrase_is_normalized() {
        let entry = compile_one("  Shortness   of\tBreath ", true);
        assert_eq!(entry.phrase_lower, "shortness of breath");
        assert!(entry.found_in("reports shortness of breath on exertion"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let entry = compile_one("pain (chronic)", true);
        assert!(entry.found_in("back pain (chronic) noted"));
        assert!(!entry.found_in("back pain chronic noted"));
    }

    #[test]
    fn boundary_pattern_only_on_word_edges() {
        assert_eq!(word_boundary_pattern("cough"), r"\bcough\b");
        assert_eq!(word_boundary_pattern("(x)"), r"\(x\)");
        assert_eq!(word_boundary_pattern("back pain"), r"\bback pain\b");
    }

    #[test]
    fn skips_short_and_anonymous_entries() {
        let vocabulary = vec![
            VocabularyEntry::new("1", "fatigue"),
            VocabularyEntry::new("2", "ha"),
            VocabularyEntry::new("", "nausea"),
            VocabularyEntry::new("4", "   "),
        ];
        let compiled = CompiledVocabulary::compile(&vocabulary, &ExtractionOptions::default());
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled.skipped(), 3);
        assert_eq!(compiled.entries()[0].id(), "1");
    }

    #[test]
    fn min_phrase_length_is_configurable() {
        let vocabulary = vec![VocabularyEntry::new("1", "ha")];
        let options = ExtractionOptions {
            min_phrase_length: 2,
            ..ExtractionOptions::default()
        };
        assert_eq!(CompiledVocabulary::compile(&vocabulary, &options).len(), 1);
    }
}
