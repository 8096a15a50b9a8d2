//! REPL terminal session management.
//!
//! The session owns at most one terminal running the BQN executable. A
//! terminal that was never created or has since exited is recreated
//! transparently; that is never an error. The working directory is captured
//! at spawn time so script paths can be sent relative to it, which keeps the
//! command short and makes it obvious when the user loads a script from a
//! different directory than the one the REPL started in (imports would not
//! resolve there).

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use libglyph_core::EditorSurface;

use crate::config::BqnConfig;

/// Start/end framing for a bracketed paste.
///
/// replxx treats a bracketed paste as one unit instead of evaluating after
/// each newline, which would fail e.g. for a line ending in `{` that starts
/// a block.
pub const BRACKETED_PASTE_START: &str = "\x1b[200~";
pub const BRACKETED_PASTE_END: &str = "\x1b[201~";

/// The process/terminal collaborator the session drives.
pub trait Terminal {
    /// Bring the terminal into view, optionally keeping editor focus.
    fn show(&mut self, preserve_focus: bool);

    /// Send text to the underlying REPL, optionally with a trailing newline.
    fn send_text(&mut self, text: &str, add_newline: bool) -> Result<()>;

    /// Whether the underlying process has exited.
    fn has_exited(&mut self) -> bool;

    /// Tear the terminal down. Called once, on session disposal.
    fn dispose(&mut self) {}
}

/// Factory for terminals, the seam hosts implement.
pub trait TerminalSpawner {
    type Term: Terminal;

    fn spawn(&mut self, name: &str, executable: &str, cwd: &Path) -> Result<Self::Term>;
}

/// REPL session: terminal lifecycle plus command sending.
pub struct ReplSession<S: TerminalSpawner> {
    config: BqnConfig,
    spawner: S,
    terminal: Option<S::Term>,
    cwd: Option<PathBuf>,
}

impl<S: TerminalSpawner> ReplSession<S> {
    pub fn new(config: BqnConfig, spawner: S) -> Self {
        Self {
            config,
            spawner,
            terminal: None,
            cwd: None,
        }
    }

    pub fn config(&self) -> &BqnConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BqnConfig {
        &mut self.config
    }

    /// Working directory the current terminal was spawned in.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Show the live terminal, or spawn a fresh one when none is running.
    ///
    /// Returns true when a terminal was freshly spawned. A fresh spawn waits
    /// out the configured startup delay so the first send does not race the
    /// REPL coming up.
    pub fn ensure_terminal(&mut self, script_dir: &Path, preserve_focus: bool) -> Result<bool> {
        if let Some(terminal) = self.terminal.as_mut() {
            if !terminal.has_exited() {
                terminal.show(preserve_focus);
                return Ok(false);
            }
            debug!("REPL terminal exited; recreating");
            self.terminal = None;
        }

        let cwd = if self.config.base.follow_script_dir {
            script_dir.to_path_buf()
        } else {
            std::env::current_dir().context("resolve working directory")?
        };
        debug!(
            executable = %self.config.base.executable_path,
            cwd = %cwd.display(),
            "spawning REPL terminal"
        );
        let mut terminal = self.spawner.spawn(
            &self.config.terminal_name,
            &self.config.base.executable_path,
            &cwd,
        )?;
        terminal.show(preserve_focus);
        self.terminal = Some(terminal);
        self.cwd = Some(cwd);

        let delay = self.config.base.startup_delay_ms;
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }
        Ok(true)
    }

    /// Run REPL commands built from the current document's script path.
    ///
    /// Ensures a terminal, optionally saves the document first, then sends
    /// each command line. The script path handed to `build` is relative to
    /// the terminal's working directory.
    pub fn run_commands<F>(
        &mut self,
        surface: &mut dyn EditorSurface,
        save_script: bool,
        build: F,
    ) -> Result<()>
    where
        F: FnOnce(&str) -> Vec<String>,
    {
        let path = surface
            .document_path()
            .context("document has no backing file")?
            .to_path_buf();
        let script_dir = parent_dir(&path);
        self.ensure_terminal(&script_dir, true)?;
        if save_script && self.config.base.save_before_load {
            surface.save()?;
        }

        let cwd = self.cwd.clone().unwrap_or(script_dir);
        let script = relative_to(&cwd, &path);
        for command in build(&script.display().to_string()) {
            self.send_line(&command)?;
        }
        Ok(())
    }

    /// Send code for evaluation, framed as a bracketed paste when the
    /// executable supports replxx.
    pub fn execute(&mut self, surface: &mut dyn EditorSurface, text: &str) -> Result<()> {
        let script_dir = surface
            .document_path()
            .map(parent_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        self.ensure_terminal(&script_dir, true)?;

        if self.config.executable_supports_replxx {
            let framed = format!("{BRACKETED_PASTE_START}{text}{BRACKETED_PASTE_END}");
            self.send_line(&framed)
        } else {
            self.send_line(text)
        }
    }

    fn send_line(&mut self, text: &str) -> Result<()> {
        trace!(%text, "sending to REPL");
        self.terminal
            .as_mut()
            .context("no REPL terminal")?
            .send_text(text, true)
    }

    /// Tear down the terminal, if any.
    pub fn dispose(&mut self) {
        if let Some(mut terminal) = self.terminal.take() {
            terminal.dispose();
        }
        self.cwd = None;
    }
}

/// REPL command to load a script.
pub fn load_script_command(script: &str) -> String {
    format!(")ex {script}")
}

/// REPL command to drop the import cache.
pub fn clear_imports_command() -> String {
    ")clearImportCache".to_string()
}

/// REPL command to profile a script through •Import.
pub fn profile_command(script: &str) -> String {
    format!(")profile ⟨⟩ •Import \"{script}\"")
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

/// Express `path` relative to `base`, component-wise.
///
/// Falls back to `path` unchanged when the two share no common root (e.g.
/// different drive prefixes).
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let base_parts: Vec<Component> = base.components().collect();
    let path_parts: Vec<Component> = path.components().collect();

    let common = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let base_is_rooted = matches!(
        base_parts.first(),
        Some(Component::RootDir | Component::Prefix(_))
    );
    if common == 0 && base_is_rooted {
        return path.to_path_buf();
    }

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[common..] {
        out.push(part);
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
