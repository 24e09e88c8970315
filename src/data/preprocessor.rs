// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Normalises the text fields of a row before tokenisation.
//
// Three jobs:
//   - lemma:   "pomme_de_terre" → "pomme de terre"
//   - clean:   definition text exported from a spreadsheet can
//              carry non-breaking spaces, tabs, line breaks and
//              runs of spaces; collapse them to single spaces
//   - segment: example sentences are stored pre-segmented, one
//              word per space. "##" glues the parts of a
//              multi-word expression that the annotation treats
//              as a single word:
//                "il mange une pomme##de##terre"
//                → ["il", "mange", "une", "pomme de terre"]
//
// Segmentation must not be normalised further: word ranks in
// the examples sheet index exactly these words.
//
// Reference: Rust Book §8 (Strings in Rust)

/// Marker joining the parts of a multi-word token.
pub const MERGE_MARKER: &str = "##";

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Display form of a lemma: underscores become spaces.
    pub fn lemma(&self, lemma: &str) -> String {
        lemma.replace('_', " ")
    }

    /// Collapse all whitespace and control characters of a
    /// free-text field into single spaces and trim the ends.
    pub fn clean(&self, text: &str) -> String {
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true;

        for c in text.chars() {
            let c = match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_whitespace() || c.is_control() => ' ',
                c => c,
            };
            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // At most one trailing space can be left over
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }

    /// Split a pre-segmented example into words, restoring the
    /// spaces inside merged multi-word tokens.
    ///
    /// Splits on single spaces only, so the word count matches
    /// the annotation's word ranks.
    pub fn segment(&self, example: &str) -> Vec<String> {
        example
            .split(' ')
            .map(|word| word.replace(MERGE_MARKER, " "))
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lemma_underscores() {
        let p = Preprocessor::new();
        assert_eq!(p.lemma("pomme_de_terre"), "pomme de terre");
        assert_eq!(p.lemma("chat"), "chat");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  animal\u{00A0}\u{00A0}domestique\n\tfélin "), "animal domestique félin");
    }

    #[test]
    fn test_clean_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("petit\x01mammifère"), "petit mammifère");
        assert_eq!(p.clean(""), "");
        assert_eq!(p.clean("   "), "");
    }

    #[test]
    fn test_segment_restores_merged_words() {
        let p = Preprocessor::new();
        assert_eq!(
            p.segment("il mange une pomme##de##terre ."),
            vec!["il", "mange", "une", "pomme de terre", "."]
        );
    }

    #[test]
    fn test_segment_keeps_word_count() {
        let p = Preprocessor::new();
        // Double space yields an empty word: ranks after it still line up
        assert_eq!(p.segment("a  b").len(), 3);
    }
}
