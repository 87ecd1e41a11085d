//! Syntax highlighting module
//!
//! This module provides the highlighting engine:
//! - Grammar files (YAML or TOML) decoded into rule trees
//! - Line-at-a-time matching with state carried across lines
//! - Incremental re-highlighting after edits
//! - A registry of languages with file type detection

mod builder;
mod builtin;
mod format;
mod group;
mod highlighter;
mod incremental;
mod language;
mod manager;
mod rules;

pub use builder::resolve_includes;
pub use format::{DetectSpec, RegionSpec, RuleSpec, SyntaxFile, SyntaxFormat};
pub use group::Group;
pub use highlighter::{group_at, Highlighter, LineMatch, State};
pub use incremental::LineStorage;
pub use language::{Detect, SyntaxDef};
pub use manager::SyntaxManager;
pub use rules::{Matcher, Pattern, Region, RegionId, Rules};
