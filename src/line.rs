//! Line representation with per-line highlighting data

use crate::syntax::{LineMatch, State};

/// A single line of text in a buffer
///
/// Besides its text a line holds the highlighting state at its end and the
/// group changes computed for it. Both are stale after an edit until the
/// highlighter recomputes them.
#[derive(Debug, Clone, Default)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
    /// Region active at the end of the line
    state: State,
    /// Group changes, if computed
    matches: Option<LineMatch>,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from a string
    pub fn from_string(s: String) -> Self {
        Self {
            text: s,
            ..Self::default()
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text content
    ///
    /// The stored matches are dropped; the stored state is kept so that
    /// recomputing states can tell whether it changed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.matches = None;
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// End-of-line highlighting state
    pub fn state(&self) -> State {
        self.state
    }

    pub fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Computed group changes, if any
    pub fn matches(&self) -> Option<&LineMatch> {
        self.matches.as_ref()
    }

    pub fn set_matches(&mut self, matches: LineMatch) {
        self.matches = Some(matches);
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Group;

    #[test]
    fn test_basic_line_operations() {
        let line = Line::from("Hello");
        assert_eq!(line.text(), "Hello");
        assert_eq!(line.len(), 5);
        assert!(!line.is_empty());
        assert!(line.state().is_none());
        assert!(line.matches().is_none());
    }

    #[test]
    fn test_set_text_drops_matches() {
        let mut line = Line::from("abc");
        let mut matches = LineMatch::new();
        matches.insert(0, Group::intern("line.test"));
        line.set_matches(matches);
        assert!(line.matches().is_some());

        line.set_text("abd");
        assert_eq!(line.text(), "abd");
        assert!(line.matches().is_none());
    }

    #[test]
    fn test_empty_line() {
        let line = Line::new();
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
    }
}
