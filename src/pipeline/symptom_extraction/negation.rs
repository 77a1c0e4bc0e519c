//! Negation detector: a small, local look-behind heuristic.
//!
//! Only the window of characters immediately before the first occurrence of a
//! phrase is inspected. There is no sentence-boundary awareness: the window
//! size is a tuning parameter, not a negation scope. A reporting cue that
//! appears after the last negation cue overrides it, which handles
//! "counseled about negative effects but patient reports experiencing X".

/// Default look-behind in characters.
pub const DEFAULT_NEGATION_WINDOW: usize = 50;

const NEGATION_CUES: &[&str] = &[
    "no ",
    "not ",
    "denies",
    "denied",
    "negative for",
    "without",
    "absent",
    "doesn't have",
    "does not have",
    "rules out",
    "ruled out",
];

const REPORTING_CUES: &[&str] = &[
    "reports",
    "reported",
    "complains of",
    "presents with",
    "experiencing",
    "having",
    "endorsed",
    "stated",
];

/// The `window_chars` characters immediately preceding byte offset `at`.
fn window_before(context: &str, at: usize, window_chars: usize) -> &str {
    let prefix = &context[..at];
    let start = prefix
        .char_indices()
        .rev()
        .nth(window_chars.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    &prefix[start..]
}

/// Start of the last negation cue in `window`, if any.
fn last_negation_cue(window: &str) -> Option<usize> {
    NEGATION_CUES.iter().filter_map(|cue| window.rfind(cue)).max()
}

/// Is the first occurrence of `phrase_lowercase` in `context` negated?
///
/// Uses the default 50-character window.
pub fn is_negated(context: &str, phrase_lowercase: &str) -> bool {
    is_negated_within(context, phrase_lowercase, DEFAULT_NEGATION_WINDOW)
}

/// Same as [`is_negated`] with an explicit window size in characters.
pub fn is_negated_within(context: &str, phrase_lowercase: &str, window_chars: usize) -> bool {
    if phrase_lowercase.is_empty() {
        return false;
    }
    let Some(at) = context.find(phrase_lowercase) else {
        return false;
    };

    let window = window_before(context, at, window_chars);
    let Some(negation_at) = last_negation_cue(window) else {
        return false;
    };

    let overridden = REPORTING_CUES
        .iter()
        .filter_map(|cue| window.rfind(cue))
        .any(|reporting_at| reporting_at > negation_at);

    !overridden
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denies_negates() {
        assert!(is_negated("patient denies headache.", "headache"));
    }

    #[test]
    fn no_evidence_negates() {
        assert!(is_negated("no evidence of insomnia on exam.", "insomnia"));
    }

    #[test]
    fn each_negation_cue_is_recognised() {
        for cue in NEGATION_CUES {
            let context = format!("{cue} chest pain today");
            assert!(is_negated(&context, "chest pain"), "cue {cue:?} not detected");
        }
    }

    #[test]
    fn absent_phrase_is_not_negated() {
        assert!(!is_negated("patient denies headache.", "nausea"));
    }

    #[test]
    fn plain_mention_is_not_negated() {
        assert!(!is_negated("patient has had a cough for a week.", "cough"));
    }

    #[test]
    fn reporting_cue_after_negation_overrides() {
        assert!(!is_negated(
            "patient denies pain but reports experiencing dizziness",
            "dizziness"
        ));
        assert!(!is_negated("no change in meds, endorsed fatigue", "fatigue"));
    }

    #[test]
    fn reporting_cue_before_negation_does_not_override() {
        assert!(is_negated("patient reported, denies fever", "fever"));
    }

    #[test]
    fn negation_outside_window_is_ignored() {
        let filler = "x".repeat(60);
        let context = format!("denies pain. {filler} fatigue");
        assert!(!is_negated(&context, "fatigue"));
    }

    #[test]
    fn window_size_is_tunable() {
        let context = "denies chills; later in the visit, myalgia";
        assert!(!is_negated_within(context, "myalgia", 10));
        assert!(is_negated_within(context, "myalgia", 50));
    }

    #[test]
    fn only_first_occurrence_is_checked() {
        // First "rash" is asserted; the later negated one is never inspected.
        assert!(!is_negated("rash on arm. no rash on legs.", "rash"));
        assert!(is_negated("no rash on legs. rash on arm.", "rash"));
    }

    #[test]
    fn window_respects_multibyte_characters() {
        let context = "dénie éàù fièvre";
        assert!(!is_negated_within(context, "fièvre", 3));
    }

    #[test]
    fn empty_phrase_is_not_negated() {
        assert!(!is_negated("denies everything", ""));
    }
}
