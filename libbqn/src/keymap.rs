//! The canonical BQN backslash keymap.
//!
//! Two parallel sequences define the layout: `BQN_KEYS[i]` composes to
//! `BQN_GLYPHS[i]`. The sequences are maintained together and cover the
//! backtick special, every shifted and unshifted alphanumeric and
//! punctuation key that carries a glyph on the standard layout, plus the
//! backslash→backslash identity for typing a literal backslash. Unassigned
//! keys (`7`, `y`, `n`, ...) are intentionally absent.

use std::sync::Arc;

use libglyph_core::KeyGlyphTable;
use once_cell::sync::Lazy;

/// Keys typed after the backslash trigger, in layout order.
pub const BQN_KEYS: &str =
    r#"\`123456890-=~!@#$%^&*()_+qwertuiop[]QWERTIOP{}asdfghjkl;ASFGHKL:"zxcvbm,./ZXVBM<>? '"#;

/// Glyphs produced by the corresponding key, in layout order.
pub const BQN_GLYPHS: &str =
    r"\˜˘¨⁼⌜´˝∞¯•÷×¬⎉⚇⍟◶⊘⎊⍎⍕⟨⟩√⋆⌽𝕨∊↑∧⊔⊏⊐π←→↙𝕎⍷𝕣⍋⊑⊒⍳⊣⊢⍉𝕤↕𝕗𝕘⊸∘○⟜⋄↖𝕊𝔽𝔾«⌾»·˙⥊𝕩↓∨⌊≡∾≍≠⋈𝕏⍒⌈≢≤≥⇐‿↩";

static KEYMAP: Lazy<Arc<KeyGlyphTable>> = Lazy::new(|| {
    // The parallel sequences above are edited together; a length mismatch is
    // a defect in this file, caught here once at startup.
    Arc::new(
        KeyGlyphTable::from_pairs(BQN_KEYS, BQN_GLYPHS)
            .expect("BQN key/glyph sequences out of sync"),
    )
});

/// The shared BQN key→glyph table.
pub fn bqn_keymap() -> Arc<KeyGlyphTable> {
    KEYMAP.clone()
}
