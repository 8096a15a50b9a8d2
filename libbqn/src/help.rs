//! Static documentation data for BQN glyphs and system values.
//!
//! Glyph help lives in a compact descriptor table: one record per line, a
//! syntactic-class letter, the glyph itself, then its name(s) with `;`
//! separating the monadic and dyadic readings. The same table drives the
//! `gen_snippets` tool, so keep the format stable.

use libglyph_core::GlyphDocs;
use once_cell::sync::Lazy;

/// Syntactic-class letters used in [`GLYPH_DESCRIPTORS`].
///
/// f Function, m 1-Modifier, d 2-Modifier, v Value, n Number, g Gets,
/// p Paren, k Brace, b Bracket, l Ligature, o Nothing, s Separator,
/// c Comment, a String.
pub const GLYPH_DESCRIPTORS: &str = "\
f+Conjugate;Add
f-Negate;Subtract
f×Sign;Multiply
f÷Reciprocal;Divide
f⋆Exponential;Power
f√Square Root;Root
f⌊Floor;Minimum
f⌈Ceiling;Maximum
f∧Sort Up;And
f∨Sort Down;Or
f¬Not;Span
f|Absolute Value;Modulus
f≤Less Than or Equal to
f<Enclose;Less Than
f>Merge;Greater Than
f≥Greater Than or Equal to
f=Rank;Equals
f≠Length;Not Equals
f≡Depth;Match
f≢Shape;Not Match
f⊣Identity;Left
f⊢Identity;Right
f⥊Deshape;Reshape
f∾Join;Join to
f≍Solo;Couple
f⋈Enlist;Pair
f↑Prefixes;Take
f↓Suffixes;Drop
f↕Range;Windows
f«Shift Before
f»Shift After
f⌽Reverse;Rotate
f⍉Transpose;Reorder axes
f/Indices;Replicate
f⍋Grade Up;Bins Up
f⍒Grade Down;Bins Down
f⊏First Cell;Select
f⊑First;Pick
f⊐Classify;Index of
f⊒Occurrence Count;Progressive Index of
f∊Mark First;Member of
f⍷Deduplicate;Find
f⊔Group Indices;Group
f!Assert;Assert with message
m˙Constant
m˜Self/Swap
d∘Atop
d○Over
d⊸Before/Bind
d⟜After/Bind
d⌾Under
d⊘Valences
d◶Choose
d⎊Catch
d⎉Rank
m˘Cells
d⚇Depth
m¨Each
m⌜Table
d⍟Repeat
m⁼Undo
m´Fold
m˝Insert
m`Scan
g←Define
g⇐Export
g↩Change
g→Return
s⋄Separator
s,Separator
p(Begin expression
p)End expression
k{Begin block
k}End block
b⟨Begin list
b⟩End list
l‿Strand
o·Nothing
v•System
v𝕨Left argument
f𝕎Left argument (as function)
v𝕩Right argument
f𝕏Right argument (as function)
v𝕗Modifier left operand (as subject)
f𝔽Modifier left operand
v𝕘2-modifier right operand (as subject)
f𝔾2-modifier right operand
v𝕤Current function (as subject)
f𝕊Current function
m𝕣Current modifier
n¯Minus
nπPi
n∞Infinity
a@Null character
c#Comment";

/// The BQN system-namespace marker.
pub const SYSTEM_MARKER: char = '•';

/// One-line help for `•`-namespace system values, keyed case-folded.
static SYSTEM_WORDS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "import" => "Load a script file as a namespace, caching the result",
    "clearimportcache" => "Drop every cached •Import result",
    "bqn" => "Evaluate a BQN expression given as a string",
    "out" => "Print a string followed by a newline",
    "show" => "Display a value and return it",
    "fmt" => "Format a value as a display string",
    "repr" => "Format a value as a source expression",
    "type" => "Numeric code for the type of a value",
    "glyph" => "The glyph of a primitive as a string",
    "decompose" => "Break a compound function into its parts",
    "rand" => "Random number generation namespace",
    "ucs" => "Convert between characters and Unicode code points",
    "fchars" => "Read or write a file as a string of characters",
    "flines" => "Read or write a file as a list of lines",
    "fbytes" => "Read or write a file as a list of bytes",
    "file" => "Filesystem access namespace",
    "sh" => "Run a shell command and capture its output",
    "exit" => "Stop the program with an exit code",
    "path" => "Directory of the current source file",
    "args" => "Arguments passed to the current file",
    "state" => "REPL state: path, name, and arguments",
};

/// One parsed glyph descriptor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    pub glyph: char,
    pub class: &'static str,
    pub name: String,
}

impl GlyphEntry {
    /// Help line as shown on hover, e.g. `Function: Square Root, Root`.
    pub fn help_text(&self) -> String {
        format!("{}: {}", self.class, self.name)
    }
}

/// Parse one descriptor record: class letter, glyph, name(s).
pub fn parse_descriptor(record: &str) -> Option<GlyphEntry> {
    let mut chars = record.chars();
    let class = class_name(chars.next()?)?;
    let glyph = chars.next()?;
    let name = chars.as_str();
    if name.is_empty() {
        return None;
    }
    Some(GlyphEntry {
        glyph,
        class,
        name: name.replace(';', ", "),
    })
}

fn class_name(letter: char) -> Option<&'static str> {
    Some(match letter {
        'f' => "Function",
        'm' => "1-Modifier",
        'd' => "2-Modifier",
        'v' => "Value",
        'n' => "Number",
        'g' => "Gets",
        'p' => "Paren",
        'k' => "Brace",
        'b' => "Bracket",
        'l' => "Ligature",
        'o' => "Nothing",
        's' => "Separator",
        'c' => "Comment",
        'a' => "String",
        _ => return None,
    })
}

/// All glyph entries from the descriptor table, in table order.
pub static GLYPH_ENTRIES: Lazy<Vec<GlyphEntry>> = Lazy::new(|| {
    GLYPH_DESCRIPTORS
        .lines()
        .filter_map(parse_descriptor)
        .collect()
});

static DOCS: Lazy<GlyphDocs> = Lazy::new(|| {
    let mut docs = GlyphDocs::new(SYSTEM_MARKER);
    for entry in GLYPH_ENTRIES.iter() {
        docs.insert_glyph(entry.glyph, entry.help_text());
    }
    for (word, help) in SYSTEM_WORDS.entries() {
        docs.insert_word(word, *help);
    }
    // Special-name context variants fold to their function-form counterpart
    // so a variant without its own entry still resolves.
    for (variant, plain) in [('𝕨', '𝕎'), ('𝕩', '𝕏'), ('𝕗', '𝔽'), ('𝕘', '𝔾'), ('𝕤', '𝕊')] {
        docs.insert_fold(variant, plain);
    }
    docs
});

/// The assembled BQN documentation tables.
pub fn bqn_docs() -> &'static GlyphDocs {
    &DOCS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_descriptor_parses() {
        let records = GLYPH_DESCRIPTORS.lines().count();
        assert_eq!(GLYPH_ENTRIES.len(), records);
    }

    #[test]
    fn test_parse_descriptor_shapes() {
        let entry = parse_descriptor("f√Square Root;Root").expect("parses");
        assert_eq!(entry.glyph, '√');
        assert_eq!(entry.class, "Function");
        assert_eq!(entry.name, "Square Root, Root");
        assert_eq!(entry.help_text(), "Function: Square Root, Root");

        // Astral glyph records still split correctly.
        let entry = parse_descriptor("v𝕨Left argument").expect("parses");
        assert_eq!(entry.glyph, '𝕨');
        assert_eq!(entry.class, "Value");
    }

    #[test]
    fn test_parse_descriptor_rejects_garbage() {
        assert_eq!(parse_descriptor(""), None);
        assert_eq!(parse_descriptor("zq"), None);
        assert_eq!(parse_descriptor("f√"), None);
    }

    #[test]
    fn test_docs_hover_glyph() {
        let docs = bqn_docs();
        assert_eq!(docs.hover("2√9", 1), Some("Function: Square Root, Root"));
        assert_eq!(docs.hover("F ⌾ G", 2), Some("2-Modifier: Under"));
    }

    #[test]
    fn test_docs_hover_special_names() {
        let docs = bqn_docs();
        // Both forms carry their own entry; the fold stays a fallback.
        assert_eq!(docs.hover("𝕨", 0), Some("Value: Left argument"));
        assert_eq!(
            docs.hover("𝕎", 0),
            Some("Function: Left argument (as function)")
        );
        assert_eq!(docs.fold('𝕤'), '𝕊');
    }

    #[test]
    fn test_docs_hover_system_word() {
        let docs = bqn_docs();
        let line = "util ← •Import \"util.bqn\"";
        let col = line.chars().position(|c| c == 'I').unwrap();
        assert_eq!(
            docs.hover(line, col),
            Some("Load a script file as a namespace, caching the result")
        );
    }

    #[test]
    fn test_docs_word_without_marker_misses() {
        assert_eq!(bqn_docs().hover("Import", 3), None);
    }
}
