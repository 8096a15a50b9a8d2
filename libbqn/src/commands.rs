//! Host-facing command set and the per-editing-session controller.
//!
//! `BqnSession` owns the composer and the REPL session for one editing
//! session, so the single-flight composition invariant and the terminal
//! handle are properties of this object rather than module-level globals.
//! The host registers one handler per `Command` and routes buffer-change
//! notifications to `notify_change` in delivery order.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use libglyph_core::{
    replacements_to_edits, ComposeOutcome, Composer, ContentChange, EditorSurface,
};

use crate::config::BqnConfig;
use crate::keymap::bqn_keymap;
use crate::repl::{
    clear_imports_command, load_script_command, profile_command, ReplSession, TerminalSpawner,
};

/// Commands the integration exposes to the host editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a composition gesture (bound to the backslash key).
    Backslash,
    /// Create or focus the REPL terminal.
    CreateTerminal,
    /// Load the current script with `)ex`.
    LoadScript,
    /// Drop the REPL's import cache.
    ClearImports,
    /// Drop the import cache, then load the current script.
    ClearImportsAndLoadScript,
    /// Profile the current script through `•Import`.
    ProfileScript,
    /// Evaluate the current selection.
    ExecuteSelection,
    /// Evaluate the current line.
    ExecuteLine,
    /// Evaluate the current line, then advance past blank/comment lines.
    ExecuteLineAdvance,
}

/// Lines to skip when advancing after execute-line: blank or comment-only.
static SKIPPABLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(#.*)?$").expect("valid literal pattern"));

/// One editing session's worth of state: composer plus REPL terminal.
pub struct BqnSession<S: TerminalSpawner> {
    composer: Composer,
    repl: ReplSession<S>,
}

impl<S: TerminalSpawner> BqnSession<S> {
    pub fn new(config: BqnConfig, spawner: S) -> Self {
        Self {
            composer: Composer::new(bqn_keymap()),
            repl: ReplSession::new(config, spawner),
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn repl(&self) -> &ReplSession<S> {
        &self.repl
    }

    pub fn repl_mut(&mut self) -> &mut ReplSession<S> {
        &mut self.repl
    }

    /// Dispatch one host command against the current editor surface.
    pub fn handle(&mut self, command: Command, surface: &mut dyn EditorSurface) -> Result<()> {
        match command {
            Command::Backslash => {
                self.backslash(surface);
                Ok(())
            }
            Command::CreateTerminal => self.create_terminal(surface),
            Command::LoadScript => {
                self.repl
                    .run_commands(surface, true, |script| vec![load_script_command(script)])
            }
            Command::ClearImports => self
                .repl
                .run_commands(surface, false, |_| vec![clear_imports_command()]),
            Command::ClearImportsAndLoadScript => self.repl.run_commands(surface, true, |script| {
                vec![clear_imports_command(), load_script_command(script)]
            }),
            Command::ProfileScript => self
                .repl
                .run_commands(surface, true, |script| vec![profile_command(script)]),
            Command::ExecuteSelection => {
                let text = surface.selection_text();
                self.repl.execute(surface, &text)
            }
            Command::ExecuteLine => {
                let text = self.current_line(surface)?;
                self.repl.execute(surface, &text)
            }
            Command::ExecuteLineAdvance => {
                let text = self.current_line(surface)?;
                self.repl.execute(surface, &text)?;
                self.advance_cursor(surface);
                Ok(())
            }
        }
    }

    /// Start a composition gesture and apply the visual backslash inserts.
    ///
    /// The insert's own change records are fed straight back to the
    /// composer, which consumes them as the expected self-inserts.
    pub fn backslash(&mut self, surface: &mut dyn EditorSurface) {
        let cursors = surface.cursors();
        let edits = self.composer.trigger(&cursors);
        let changes = surface.apply(edits);
        for change in &changes {
            self.notify_change(change, surface);
        }
    }

    /// Feed one buffer-change notification to the composer, applying the
    /// resolved replacement batch when the gesture completes.
    pub fn notify_change(
        &mut self,
        change: &ContentChange,
        surface: &mut dyn EditorSurface,
    ) -> ComposeOutcome {
        let outcome = self.composer.observe(change);
        if let ComposeOutcome::Apply(batch) = &outcome {
            surface.apply(replacements_to_edits(batch.clone()));
        }
        outcome
    }

    fn create_terminal(&mut self, surface: &mut dyn EditorSurface) -> Result<()> {
        let script_dir = surface
            .document_path()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        self.repl.ensure_terminal(&script_dir, false)?;
        Ok(())
    }

    fn current_line(&self, surface: &dyn EditorSurface) -> Result<String> {
        let cursor = surface
            .cursors()
            .into_iter()
            .next()
            .context("no active cursor")?;
        surface
            .line_text(cursor.line)
            .with_context(|| format!("no line {} in document", cursor.line))
    }

    /// Move the cursor down past blank and comment-only lines, stopping
    /// before the last line of the document.
    fn advance_cursor(&self, surface: &mut dyn EditorSurface) {
        let cursor = match surface.cursors().into_iter().next() {
            Some(cursor) => cursor,
            None => return,
        };
        let line_count = surface.line_count();
        let mut step = 1u32;
        while cursor.line + step < line_count.saturating_sub(1) {
            let text = surface.line_text(cursor.line + step).unwrap_or_default();
            if !SKIPPABLE_LINE.is_match(&text) {
                break;
            }
            step += 1;
        }
        surface.move_cursors_down(step);
    }

    /// Tear down the REPL terminal (host deactivation hook).
    pub fn dispose(&mut self) {
        self.repl.dispose();
    }
}
