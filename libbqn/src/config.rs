//! BQN-specific configuration that extends the base `Config` from core.
//!
//! All generic fields (executable path, startup delay, save-before-load,
//! follow-script-dir) are flattened in via serde, so one TOML document
//! configures both layers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BqnConfig {
    /// Base configuration fields (executable, delays, flags).
    #[serde(flatten)]
    pub base: libglyph_core::Config,

    /// The REPL uses replxx line editing, so multi-line sends must be framed
    /// as a bracketed paste to evaluate as one unit.
    pub executable_supports_replxx: bool,

    /// Display name of the REPL terminal.
    pub terminal_name: String,
}

impl Default for BqnConfig {
    fn default() -> Self {
        let mut base = libglyph_core::Config::default();
        base.executable_path = "bqn".to_string();

        Self {
            base,
            executable_supports_replxx: true,
            terminal_name: "BQN".to_string(),
        }
    }
}

impl BqnConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Convert this config into the base config.
    pub fn into_base(self) -> libglyph_core::Config {
        self.base
    }

    /// Get a reference to the base config.
    pub fn base(&self) -> &libglyph_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config.
    pub fn base_mut(&mut self) -> &mut libglyph_core::Config {
        &mut self.base
    }
}
