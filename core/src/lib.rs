//! libglyph-core
//!
//! Host-agnostic engine for composing backslash-style key sequences into
//! notation glyphs, shared by language-specific crates (libbqn today, other
//! symbol-dense notations tomorrow).
//!
//! Public API:
//! - `KeyGlyphTable` - immutable key→glyph mapping built from parallel sequences
//! - `Composer` - two-phase gesture state machine over buffer-change records
//! - `EditorSurface` / `ScratchBuffer` - host editor seam and in-memory reference
//! - `GlyphDocs` - hover documentation lookup for glyphs and system words
//! - `Config` - typed, TOML-backed configuration with named defaulted fields

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod span;
pub use span::{ContentChange, EditSpan, Position, TextEdit};

pub mod keymap;
pub use keymap::KeyGlyphTable;

pub mod composer;
pub use composer::{replacements_to_edits, ComposeOutcome, ComposeState, Composer, DEFAULT_TRIGGER};

pub mod surface;
pub use surface::{EditorSurface, ScratchBuffer};

pub mod docs;
pub use docs::GlyphDocs;

/// Generic configuration shared by all notation frontends.
///
/// Only notation-agnostic fields live here; frontends extend it with their
/// own options via `#[serde(flatten)]` (see `BqnConfig` in libbqn).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path or name of the REPL executable to spawn.
    pub executable_path: String,

    /// Delay in milliseconds before the first send to a freshly spawned
    /// REPL, giving it time to come up.
    pub startup_delay_ms: u64,

    /// Save the document before loading it into the REPL.
    pub save_before_load: bool,

    /// Spawn the REPL in the directory of the script being edited rather
    /// than the process working directory.
    pub follow_script_dir: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable_path: "repl".to_string(),
            startup_delay_ms: 300,
            save_before_load: true,
            follow_script_dir: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
