//! Hover documentation lookup over static glyph and system-word tables.
//!
//! Purely functional: given a line of text and a character column, resolve
//! the glyph under the cursor (after folding stylistic context variants to
//! their plain counterparts) against the glyph table, and fall back to the
//! system-word table when the identifier under the cursor is introduced by
//! the namespace marker (`•Import`, `•Show`, ...).

use ahash::AHashMap;
use unicode_normalization::UnicodeNormalization;

/// Static documentation tables for one notation.
#[derive(Debug, Clone)]
pub struct GlyphDocs {
    glyph_help: AHashMap<char, String>,
    word_help: AHashMap<String, String>,
    folds: AHashMap<char, char>,
    system_marker: char,
}

impl GlyphDocs {
    pub fn new(system_marker: char) -> Self {
        Self {
            glyph_help: AHashMap::new(),
            word_help: AHashMap::new(),
            folds: AHashMap::new(),
            system_marker,
        }
    }

    /// Register help text for a glyph.
    pub fn insert_glyph(&mut self, glyph: char, help: impl Into<String>) {
        self.glyph_help.insert(glyph, help.into());
    }

    /// Register help text for a system word (stored case-folded).
    pub fn insert_word(&mut self, word: &str, help: impl Into<String>) {
        self.word_help.insert(normalize_word(word), help.into());
    }

    /// Register a stylistic variant that folds to a plain glyph before the
    /// glyph table is probed (e.g. the bold context variant 𝕨 → 𝕎).
    pub fn insert_fold(&mut self, variant: char, plain: char) {
        self.folds.insert(variant, plain);
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_help.len()
    }

    pub fn word_count(&self) -> usize {
        self.word_help.len()
    }

    /// Fold a stylistic variant to its plain counterpart, if one is known.
    pub fn fold(&self, glyph: char) -> char {
        self.folds.get(&glyph).copied().unwrap_or(glyph)
    }

    /// Help text for the character at `character` (scalar column) in `line`.
    ///
    /// Probes the glyph table first, then, when the identifier under the
    /// cursor is immediately preceded by the system-namespace marker, the
    /// word table. First match wins.
    pub fn hover(&self, line: &str, character: usize) -> Option<&str> {
        let chars: Vec<char> = line.chars().collect();
        let ch = *chars.get(character)?;

        if let Some(help) = self.glyph_help.get(&ch) {
            return Some(help);
        }
        let folded = self.fold(ch);
        if folded != ch {
            if let Some(help) = self.glyph_help.get(&folded) {
                return Some(help);
            }
        }

        self.hover_word(&chars, character)
    }

    fn hover_word(&self, chars: &[char], character: usize) -> Option<&str> {
        let mut start = character;
        if chars[start] == self.system_marker {
            // Cursor on the marker itself: document the word that follows.
            start += 1;
            if start >= chars.len() || !is_word_char(chars[start]) {
                return None;
            }
        } else if !is_word_char(chars[start]) {
            return None;
        }

        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }
        if start == 0 || chars[start - 1] != self.system_marker {
            return None;
        }

        let mut end = start;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
        let word: String = chars[start..end].iter().collect();
        self.word_help.get(&normalize_word(&word)).map(String::as_str)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// NFC-normalize and case-fold a system word for table probing.
fn normalize_word(word: &str) -> String {
    word.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> GlyphDocs {
        let mut docs = GlyphDocs::new('•');
        docs.insert_glyph('√', "Function: Square Root, Root");
        docs.insert_glyph('𝕎', "Value: Left argument");
        docs.insert_fold('𝕨', '𝕎');
        docs.insert_word("Import", "Load a script file as a namespace");
        docs.insert_word("Show", "Display a value and return it");
        docs
    }

    #[test]
    fn test_glyph_probe() {
        let docs = docs();
        assert_eq!(
            docs.hover("2√x", 1),
            Some("Function: Square Root, Root")
        );
        assert_eq!(docs.hover("2√x", 2), None);
    }

    #[test]
    fn test_variant_folds_to_plain() {
        let docs = docs();
        // 𝕨 has no entry of its own; the fold resolves it to 𝕎's entry.
        assert_eq!(docs.hover("𝕨+1", 0), Some("Value: Left argument"));
        assert_eq!(docs.hover("𝕎+1", 0), Some("Value: Left argument"));
    }

    #[test]
    fn test_own_entry_beats_fold() {
        let mut docs = docs();
        docs.insert_glyph('𝕨', "Value: Left argument (as subject)");
        assert_eq!(docs.hover("𝕨+1", 0), Some("Value: Left argument (as subject)"));
    }

    #[test]
    fn test_system_word_requires_marker() {
        let docs = docs();
        let line = "x ← •Import \"util.bqn\"";
        // Cursor anywhere inside the word resolves.
        let col = line.chars().position(|c| c == 'm').unwrap();
        assert_eq!(docs.hover(line, col), Some("Load a script file as a namespace"));
        // Same word without the marker does not.
        assert_eq!(docs.hover("Import x", 2), None);
    }

    #[test]
    fn test_cursor_on_marker_documents_following_word() {
        let docs = docs();
        let line = "•Show 5";
        assert_eq!(docs.hover(line, 0), Some("Display a value and return it"));
    }

    #[test]
    fn test_word_probe_is_case_insensitive() {
        let docs = docs();
        assert_eq!(docs.hover("•import x", 3), Some("Load a script file as a namespace"));
    }

    #[test]
    fn test_out_of_range_and_unknown() {
        let docs = docs();
        assert_eq!(docs.hover("abc", 10), None);
        assert_eq!(docs.hover("•Nope", 2), None);
        assert_eq!(docs.hover("", 0), None);
    }

    #[test]
    fn test_astral_column_arithmetic() {
        // Columns count scalar values, so the glyph after 𝕨 is at column 1.
        let docs = docs();
        assert_eq!(docs.hover("𝕨√", 1), Some("Function: Square Root, Root"));
    }
}
