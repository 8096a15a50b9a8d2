//! libbqn crate root
//!
//! BQN editor integration built on `libglyph-core`: the canonical backslash
//! keymap, glyph and system-value hover help, REPL terminal session
//! management, and the host-facing command set.
//!
//! Public API exported here:
//! - `bqn_keymap` and the parallel key/glyph constants from `keymap`
//! - `bqn_docs` and the glyph descriptor table from `help`
//! - `BqnSession` and `Command` from `commands`
//! - `ReplSession`, `Terminal`, `TerminalSpawner` from `repl`
//! - `BqnConfig` from `config`

pub mod commands;
pub mod config;
pub mod help;
pub mod keymap;
pub mod process;
pub mod repl;

// Re-export the engine types callers need alongside the frontend.
pub use libglyph_core::{
    ComposeOutcome, ComposeState, Composer, Config, ContentChange, EditSpan, EditorSurface,
    GlyphDocs, KeyGlyphTable, Position, ScratchBuffer, TextEdit,
};

// Convenience re-exports for common types used by callers.
pub use commands::{BqnSession, Command};
pub use config::BqnConfig;
pub use help::{bqn_docs, GlyphEntry, GLYPH_DESCRIPTORS, GLYPH_ENTRIES, SYSTEM_MARKER};
pub use keymap::{bqn_keymap, BQN_GLYPHS, BQN_KEYS};
pub use process::{ProcessSpawner, ProcessTerminal};
pub use repl::{ReplSession, Terminal, TerminalSpawner};
