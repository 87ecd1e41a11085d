//! Configuration file support
//!
//! Loads settings from ~/.hilite.conf (or %USERPROFILE%\.hilite.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # hilite configuration
//! syntax-dir = ~/.config/hilite/syntax
//! builtin-syntax = true
//! highlighting = true
//! color = auto
//! tab-width = 4
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// When to emit terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Only when standard output is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            other => {
                if parse_bool(other) {
                    Some(ColorMode::Always)
                } else if matches!(other, "false" | "no" | "off" | "0") {
                    Some(ColorMode::Never)
                } else {
                    None
                }
            }
        }
    }
}

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of user grammar files
    pub syntax_dir: Option<PathBuf>,
    /// Whether to load the built-in grammars
    pub builtin_syntax: bool,
    /// Whether highlighting is enabled at all
    pub highlighting: bool,
    /// When to emit colors
    pub color: ColorMode,
    /// Tab width for display
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            syntax_dir: None,
            builtin_syntax: true,
            highlighting: true,
            color: ColorMode::Auto,
            tab_width: 8,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".hilite.conf"))
    }

    /// Load configuration from the default file
    ///
    /// A missing or unreadable file gives the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Config::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        match fs::read_to_string(path) {
            Ok(contents) => {
                let settings = Self::parse(&contents);
                config.apply(&settings);
                tracing::debug!("Loaded configuration from {}", path.display());
            }
            Err(e) => tracing::debug!("No configuration at {}: {}", path.display(), e),
        }

        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("syntax-dir") {
            if !value.is_empty() {
                self.syntax_dir = Some(expand_home(value));
            }
        }

        if let Some(value) = settings.get("builtin-syntax") {
            self.builtin_syntax = parse_bool(value);
        }

        if let Some(value) = settings.get("highlighting") {
            self.highlighting = parse_bool(value);
        }

        if let Some(value) = settings.get("color") {
            match ColorMode::parse(value) {
                Some(mode) => self.color = mode,
                None => tracing::warn!("Ignoring invalid color setting '{}'", value),
            }
        }

        if let Some(value) = settings.get("tab-width") {
            if let Ok(n) = value.parse::<usize>() {
                self.tab_width = n.clamp(1, 16); // Between 1 and 16
            }
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }

    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(value)
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
