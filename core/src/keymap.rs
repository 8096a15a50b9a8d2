//! Key→glyph tables built from parallel character sequences.
//!
//! A `KeyGlyphTable` maps the single key typed after the composition trigger
//! to the glyph it produces. Tables are built once at startup from two
//! ordered sequences of equal length; the length check is validated, never
//! assumed, so a malformed table is a construction-time error rather than a
//! silent runtime misfire.

use ahash::AHashMap;

/// Immutable mapping from trigger key to glyph.
#[derive(Debug, Clone, Default)]
pub struct KeyGlyphTable {
    map: AHashMap<char, char>,
}

impl KeyGlyphTable {
    /// Build a table from parallel `keys`/`glyphs` sequences where
    /// `keys[i]` composes to `glyphs[i]`.
    ///
    /// Returns an error when the sequences differ in length. Duplicate keys
    /// are last-write-wins; canonical layouts are expected to be
    /// duplicate-free by construction.
    pub fn from_pairs(keys: &str, glyphs: &str) -> Result<Self, String> {
        let key_count = keys.chars().count();
        let glyph_count = glyphs.chars().count();
        if key_count != glyph_count {
            return Err(format!(
                "key/glyph sequence length mismatch: {} keys vs {} glyphs",
                key_count, glyph_count
            ));
        }

        let mut map = AHashMap::with_capacity(key_count);
        for (key, glyph) in keys.chars().zip(glyphs.chars()) {
            map.insert(key, glyph);
        }
        Ok(Self { map })
    }

    /// Look up the glyph for a trigger key.
    pub fn lookup(&self, key: char) -> Option<char> {
        self.map.get(&key).copied()
    }

    /// Whether the table maps the given key.
    pub fn contains(&self, key: char) -> bool {
        self.map.contains_key(&key)
    }

    /// Number of key→glyph entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over (key, glyph) entries in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.map.iter().map(|(k, v)| (*k, *v))
    }
}
