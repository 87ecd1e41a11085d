//! Compiled language definitions
//!
//! A [`SyntaxDef`] combines a filetype name, the data used to recognize
//! files of that type, and the rule tree used to highlight them. It is
//! built once and then shared read-only by every highlighter for that
//! language.

use std::borrow::Borrow;

use regex::Regex;

use super::builder::{self, Builder};
use super::format::{DetectSpec, SyntaxFile};
use super::rules::{Region, RegionId, Rules};
use crate::error::{GrammarError, HighlightError, Result};

/// File detection data for one language
#[derive(Debug, Clone)]
pub struct Detect {
    /// Matched against the file name
    pub filename: Regex,
    /// Matched against the first line when the name does not match
    pub header: Option<Regex>,
}

impl Detect {
    fn compile(spec: &DetectSpec) -> std::result::Result<Self, GrammarError> {
        let filename = Regex::new(&spec.filename).map_err(|source| GrammarError::Regex {
            key: "detect.filename".to_string(),
            source,
        })?;
        let header = spec
            .header
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|source| GrammarError::Regex {
                key: "detect.header".to_string(),
                source,
            })?;
        Ok(Self { filename, header })
    }

    /// Check a file name and first line against this detector
    pub fn matches(&self, filename: &str, first_line: &str) -> bool {
        if self.filename.is_match(filename) {
            return true;
        }
        self.header
            .as_ref()
            .is_some_and(|header| header.is_match(first_line))
    }
}

/// A complete, compiled language definition
#[derive(Debug, Clone)]
pub struct SyntaxDef {
    pub(crate) filetype: String,
    pub(crate) detect: Option<Detect>,
    pub(crate) rules: Rules,
    pub(crate) regions: Vec<Region>,
}

impl SyntaxDef {
    /// Compile a decoded grammar file
    ///
    /// Any bad regex or malformed region fails the whole definition.
    pub fn from_file(file: &SyntaxFile) -> Result<Self> {
        let grammar_error = |source| HighlightError::Grammar {
            filetype: file.filetype.clone(),
            source,
        };

        let detect = file
            .detect
            .as_ref()
            .map(Detect::compile)
            .transpose()
            .map_err(grammar_error)?;

        let mut builder = Builder::new();
        let rules = builder
            .build_rules(&file.rules, None)
            .map_err(grammar_error)?;
        let regions = builder.finish();

        tracing::debug!(
            "Compiled syntax '{}': {} patterns, {} regions",
            file.filetype,
            rules.patterns.len(),
            regions.len()
        );

        Ok(Self {
            filetype: file.filetype.clone(),
            detect,
            rules,
            regions,
        })
    }

    /// Language name (e.g., "c", "rust")
    pub fn filetype(&self) -> &str {
        &self.filetype
    }

    /// Top-level rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get a region by ID
    ///
    /// IDs are only meaningful for the definition that produced them.
    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id.index()]
    }

    /// Number of regions in this definition, at any depth
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// File detection data, if the grammar declares any
    pub fn detect(&self) -> Option<&Detect> {
        self.detect.as_ref()
    }

    /// Check whether a file belongs to this language
    pub fn matches_file(&self, filename: &str, first_line: &str) -> bool {
        self.detect
            .as_ref()
            .is_some_and(|detect| detect.matches(filename, first_line))
    }

    /// Merge `include`d languages from `known` into this definition
    ///
    /// Returns the names of languages that could not be found; those
    /// includes contribute nothing.
    pub fn resolve_includes<D: Borrow<SyntaxDef>>(&mut self, known: &[D]) -> Vec<String> {
        builder::resolve_includes(self, known)
    }
}
