//! Editor configuration: edit mode, timeouts, interrupt policy, and user
//! key rebindings, loadable from a TOML file.
//!
//! Binding data is plain string maps (`keymap -> sequence -> widget-name`);
//! the engine validates names and notation when it applies them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Which discipline a fresh line starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Emacs,
    Vi,
}

/// What an interrupt signal does to the current line. One global policy,
/// not a per-call choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptPolicy {
    /// Surface `ReadOutcome::Interrupted` to the caller.
    Surface,
    /// Discard the line and keep reading from a fresh empty buffer.
    RestartLine,
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Emacs or Vi key handling.
    pub edit_mode: EditMode,
    /// Bounded wait before committing an ambiguous key-sequence prefix.
    pub ambiguous_timeout_ms: u64,
    /// Interrupt handling policy.
    pub interrupt: InterruptPolicy,
    /// Append accepted lines to history automatically.
    pub auto_add_history: bool,
    /// Case-insensitive incremental history search.
    pub search_ignore_case: bool,
    /// User rebindings: keymap name -> key sequence -> widget name.
    pub bindings: HashMap<String, HashMap<String, String>>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            edit_mode: EditMode::Emacs,
            ambiguous_timeout_ms: 100,
            interrupt: InterruptPolicy::Surface,
            auto_add_history: true,
            search_ignore_case: false,
            bindings: HashMap::new(),
        }
    }
}

impl EditorConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, EditError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EditError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Saves the configuration, creating parent directories as needed.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EditError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Default configuration file location, when a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keyline").join("keyline.toml"))
    }
}
