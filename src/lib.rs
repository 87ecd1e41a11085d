//! hilite - region-based incremental syntax highlighting
//!
//! The engine lives in [`syntax`]: grammars are decoded from YAML or TOML,
//! compiled into a tree of patterns and regions, and matched one line at a
//! time with the open region carried from line to line. [`buffer::Buffer`]
//! stores text and highlighting results per line, and [`render`] paints
//! them to a terminal.

pub mod buffer;
pub mod config;
pub mod error;
pub mod line;
pub mod render;
pub mod syntax;
pub mod theme;

pub use error::{GrammarError, HighlightError, Result};
