//! Child-process terminal backend.
//!
//! Hosts with their own terminal panel implement `Terminal` against it; this
//! backend is for headless embeddings (the demo binary, scripting) and runs
//! the REPL as a plain child process with a piped stdin.

use std::io::Write;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

use crate::repl::{Terminal, TerminalSpawner};

/// A REPL running as a child process.
pub struct ProcessTerminal {
    name: String,
    child: Child,
}

impl ProcessTerminal {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Terminal for ProcessTerminal {
    fn show(&mut self, _preserve_focus: bool) {
        // Headless: the process writes straight to our stdout.
    }

    fn send_text(&mut self, text: &str, add_newline: bool) -> Result<()> {
        let stdin = self
            .child
            .stdin
            .as_mut()
            .context("REPL stdin is not piped")?;
        stdin.write_all(text.as_bytes()).context("write to REPL")?;
        if add_newline {
            stdin.write_all(b"\n").context("write to REPL")?;
        }
        stdin.flush().context("flush REPL stdin")?;
        Ok(())
    }

    fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    fn dispose(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawns `ProcessTerminal`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSpawner;

impl TerminalSpawner for ProcessSpawner {
    type Term = ProcessTerminal;

    fn spawn(&mut self, name: &str, executable: &str, cwd: &Path) -> Result<ProcessTerminal> {
        debug!(%name, %executable, cwd = %cwd.display(), "spawning REPL process");
        let child = Command::new(executable)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawn {executable}"))?;
        Ok(ProcessTerminal {
            name: name.to_string(),
            child,
        })
    }
}
