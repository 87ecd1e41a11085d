//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that owns every loaded language
//! definition, resolves includes between them, and picks the right one for
//! a file.

use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::format::{SyntaxFile, SyntaxFormat};
use super::language::SyntaxDef;
use crate::config::Config;
use crate::error::{HighlightError, Result};

/// Registry of language definitions
pub struct SyntaxManager {
    /// Definitions as compiled, before includes are merged
    sources: Vec<SyntaxDef>,
    /// Definitions with includes merged, in the same order as `sources`
    languages: Vec<Arc<SyntaxDef>>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a syntax manager with the built-in languages
    pub fn new() -> Self {
        let mut manager = Self::empty();
        manager.load_builtins();
        manager
    }

    /// Create a syntax manager with no languages
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
            languages: Vec::new(),
            enabled: true,
        }
    }

    /// Create a syntax manager as described by the user's configuration
    ///
    /// Grammars from the configured syntax directory replace built-in
    /// grammars of the same filetype. Files that fail to load are logged
    /// and skipped.
    pub fn from_config(config: &Config) -> Self {
        let mut manager = Self::empty();
        manager.enabled = config.highlighting;

        if config.builtin_syntax {
            manager.load_builtins();
        }

        if let Some(dir) = &config.syntax_dir {
            match manager.load_dir(dir) {
                Ok(errors) => {
                    for err in errors {
                        tracing::warn!("{}", err);
                    }
                }
                Err(e) => tracing::warn!("Cannot read syntax directory {}: {}", dir.display(), e),
            }
        }

        manager
    }

    fn load_builtins(&mut self) {
        for builtin in builtin::all_syntaxes() {
            let compiled = SyntaxFile::parse(builtin.source, builtin.format, builtin.name)
                .and_then(|file| SyntaxDef::from_file(&file));
            match compiled {
                Ok(def) => self.install(def),
                Err(e) => {
                    tracing::warn!("Built-in syntax '{}' failed to load: {}", builtin.name, e)
                }
            }
        }
        self.resolve();
    }

    /// Add a decoded grammar
    ///
    /// A grammar that fails to compile is not installed and leaves the
    /// other languages untouched.
    pub fn add_file(&mut self, file: &SyntaxFile) -> Result<()> {
        let def = SyntaxDef::from_file(file)?;
        self.install(def);
        self.resolve();
        Ok(())
    }

    /// Decode and add a grammar from source text
    pub fn add_source(
        &mut self,
        source: &str,
        format: SyntaxFormat,
        source_name: &str,
    ) -> Result<()> {
        let file = SyntaxFile::parse(source, format, source_name)?;
        self.add_file(&file)
    }

    /// Load a grammar file from disk
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let file = SyntaxFile::load(path)?;
        self.add_file(&file)
    }

    /// Load every grammar file in a directory
    ///
    /// Only `.yaml`, `.yml` and `.toml` files are considered. Returns the
    /// errors of files that failed to load; all other files are installed.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<HighlightError>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && SyntaxFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut errors = Vec::new();
        let mut loaded = 0;
        for path in &paths {
            let compiled = SyntaxFile::load(path).and_then(|file| SyntaxDef::from_file(&file));
            match compiled {
                Ok(def) => {
                    self.install(def);
                    loaded += 1;
                }
                Err(e) => errors.push(e),
            }
        }
        self.resolve();

        tracing::debug!(
            "Loaded {} syntax files from {} ({} failed)",
            loaded,
            dir.display(),
            errors.len()
        );
        Ok(errors)
    }

    /// Add or replace a compiled definition without resolving includes
    fn install(&mut self, def: SyntaxDef) {
        match self
            .sources
            .iter()
            .position(|existing| existing.filetype() == def.filetype())
        {
            Some(index) => {
                tracing::debug!("Replacing syntax '{}'", def.filetype());
                self.sources[index] = def;
            }
            None => self.sources.push(def),
        }
    }

    /// Rebuild every language with its includes merged
    ///
    /// Includes always merge the definition as compiled, so the result does
    /// not depend on load order.
    fn resolve(&mut self) {
        self.languages = self
            .sources
            .iter()
            .map(|source| {
                let mut def = source.clone();
                def.resolve_includes(&self.sources);
                Arc::new(def)
            })
            .collect();
    }

    /// Get a language definition by filetype
    pub fn get_language(&self, filetype: &str) -> Option<Arc<SyntaxDef>> {
        self.languages
            .iter()
            .find(|def| def.filetype() == filetype)
            .cloned()
    }

    /// Detect the language of a file from its name and first line
    ///
    /// The first definition whose filename pattern matches wins; header
    /// patterns are only consulted when no filename matches.
    pub fn detect_language(&self, filename: &Path, first_line: &str) -> Option<Arc<SyntaxDef>> {
        let name = filename.to_string_lossy();

        let by_name = self.languages.iter().find(|def| {
            def.detect()
                .is_some_and(|detect| detect.filename.is_match(&name))
        });
        if let Some(def) = by_name {
            return Some(Arc::clone(def));
        }

        self.languages
            .iter()
            .find(|def| def.matches_file(&name, first_line))
            .cloned()
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.iter().map(|def| def.filetype()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new()
    }
}
