/// Canonicalize raw note text before any matching.
/// Lower-cases, collapses every whitespace run (tabs, CRLF, newlines) to one space, trims.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize("Patient Reports COUGH"), "patient reports cough");
    }

    #[test]
    fn collapses_tabs_and_crlf() {
        let raw = "HPI:\r\n\tPatient  reports\r\n\r\nfatigue";
        assert_eq!(normalize(raw), "hpi: patient reports fatigue");
    }

    #[test]
    fn trims_ends() {
        assert_eq!(normalize("   headache \n"), "headache");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\r\n "), "");
    }

    #[test]
    fn unicode_whitespace_collapses() {
        assert_eq!(normalize("cough\u{2028}fever"), "cough fever");
        assert_eq!(normalize("cough\u{0085}\u{2029}fever"), "cough fever");
        assert_eq!(normalize("cough\u{00A0}\u{3000}fever"), "cough fever");
        assert_eq!(normalize("\u{000B}\u{000C}cough\r\n\r\n"), "cough");
    }

    #[test]
    fn combining_marks_are_kept() {
        assert_eq!(normalize("Fie\u{0300}vre"), "fie\u{0300}vre");
        assert_eq!(normalize("İ"), "i\u{0307}");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Patient Reports:\tAnxiety,\r\nFatigue and\n\nINSOMNIA.  ",
            "  ",
            "",
            "Chief Complaint: CHEST PAIN\u{00A0}since Monday",
            "ÉTAT GÉNÉRAL: fièvre",
            "HPI:\r\n\r\n\t\r\nCOUGH\r\r\n\nfever",
            "line\u{2028}separator\u{2029}paragraph",
            "next\u{0085}line\u{000B}tab\u{000C}feed",
            "ideographic\u{3000}space\u{1680}ogham\u{205F}math",
            "Fie\u{0300}VRE and NAUSE\u{0301}E",
            "İSTANBUL trip, ΟΔΥΣΣΕΥΣ ΧΑΟΣ",
            "zero\u{200B}width stays",
            "ß and ẞ, ǅ digraph",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {s:?}");
        }
    }
}
