//! Generate editor snippet JSON from the glyph descriptor table.
//!
//! Each glyph becomes one snippet named by its class and reading(s), with
//! the backslash key sequence as the prefix. Glyphs that have no key on the
//! backslash layout use the glyph itself as the prefix, so they still show
//! up in completion.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use libbqn::{bqn_keymap, GlyphEntry, GLYPH_ENTRIES};

#[derive(Parser)]
#[command(about = "Generate editor snippets from the BQN glyph tables")]
struct Args {
    /// Where to write the snippet JSON.
    #[arg(long, default_value = "bqn.snippets.json")]
    out: PathBuf,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct Snippet {
    body: Vec<String>,
    prefix: Vec<String>,
}

/// Glyph → key, inverted from the canonical key → glyph layout.
fn reverse_keymap() -> BTreeMap<char, char> {
    bqn_keymap()
        .entries()
        .map(|(key, glyph)| (glyph, key))
        .collect()
}

/// Build the snippet table. Entries that render to the same display name
/// (the two separators) collapse; the later record wins.
fn snippets(entries: &[GlyphEntry], keys: &BTreeMap<char, char>) -> BTreeMap<String, Snippet> {
    entries
        .iter()
        .map(|entry| {
            let prefix = match keys.get(&entry.glyph) {
                Some(key) => format!("\\{key}"),
                None => entry.glyph.to_string(),
            };
            (
                entry.help_text(),
                Snippet {
                    body: vec![entry.glyph.to_string()],
                    prefix: vec![prefix],
                },
            )
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = snippets(&GLYPH_ENTRIES[..], &reverse_keymap());
    let json = serde_json::to_string_pretty(&table).context("serialize snippet table")?;
    fs::write(&args.out, json).with_context(|| format!("write {}", args.out.display()))?;

    println!("Wrote {} snippets to {}", table.len(), args.out.display());
    Ok(())
}
