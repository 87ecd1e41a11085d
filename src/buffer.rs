//! Buffer representation - a collection of lines with associated metadata

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::line::Line;
use crate::syntax::{LineMatch, LineStorage, State};

/// A buffer containing text and per-line highlighting data
///
/// After an edit, call the highlighter's `recompute_states` starting at the
/// edited line, then `recompute_matches` for the lines that will be shown.
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text
    lines: Vec<Line>,
    /// Buffer name (e.g., "main.rs", "*stdin*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
}

impl Buffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: vec![Line::new()], // Always have at least one line
            name: name.into(),
            filename: None,
        }
    }

    /// Create a buffer from text
    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        let mut lines: Vec<Line> = content.lines().map(Line::from).collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }

        Self {
            lines,
            name: name.into(),
            filename: None,
        }
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Text of the first line, used for header detection
    pub fn first_line(&self) -> &str {
        self.lines.first().map(Line::text).unwrap_or("")
    }

    /// Replace the text of a line
    pub fn set_line(&mut self, idx: usize, text: impl Into<String>) {
        if let Some(line) = self.lines.get_mut(idx) {
            line.set_text(text);
        }
    }

    /// Insert a new line before `idx` (or at the end if `idx` is past it)
    ///
    /// The new line starts out with the state of the line above it, which
    /// is the state the following line was computed from.
    pub fn insert_line(&mut self, idx: usize, text: impl Into<String>) {
        let idx = idx.min(self.lines.len());
        let mut line = Line::from_string(text.into());
        if idx > 0 {
            line.set_state(self.lines[idx - 1].state());
        }
        self.lines.insert(idx, line);
    }

    /// Delete a line by index
    ///
    /// The last remaining line is cleared instead of removed.
    pub fn remove_line(&mut self, idx: usize) {
        if idx >= self.lines.len() {
            return;
        }
        if self.lines.len() > 1 {
            self.lines.remove(idx);
        } else {
            self.lines[0] = Line::new();
        }
    }

    /// The whole buffer as text, lines joined with newlines
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("*scratch*")
    }
}

impl LineStorage for Buffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> &str {
        self.lines[line].text()
    }

    fn state(&self, line: usize) -> State {
        self.lines[line].state()
    }

    fn set_state(&mut self, line: usize, state: State) {
        self.lines[line].set_state(state);
    }

    fn set_match(&mut self, line: usize, matches: LineMatch) {
        self.lines[line].set_matches(matches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{group_at, Group, Highlighter, SyntaxDef, SyntaxFile, SyntaxFormat};

    fn block_comments() -> SyntaxDef {
        let source = r#"
filetype: blocks
rules:
    - buf.keyword: "\\bif\\b"
    - buf.comment:
        start: "/\\*"
        end: "\\*/"
"#;
        let file = SyntaxFile::parse(source, SyntaxFormat::Yaml, "test").unwrap();
        SyntaxDef::from_file(&file).unwrap()
    }

    /// States as computed from scratch, for comparison
    fn fresh_states(hl: &Highlighter, buffer: &Buffer) -> Vec<State> {
        let mut fresh = Buffer::from_text("fresh", &buffer.text());
        hl.highlight_buffer(&mut fresh);
        fresh.lines().iter().map(Line::state).collect()
    }

    fn states(buffer: &Buffer) -> Vec<State> {
        buffer.lines().iter().map(Line::state).collect()
    }

    #[test]
    fn test_from_text() {
        let buffer = Buffer::from_text("test", "one\ntwo\r\nthree\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.first_line(), "one");
        assert_eq!(buffer.line(1).unwrap().text(), "two");
        assert_eq!(buffer.text(), "one\ntwo\nthree");

        let empty = Buffer::from_text("empty", "");
        assert_eq!(empty.line_count(), 1);
        assert_eq!(empty.first_line(), "");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.c");
        std::fs::write(&path, "int x;\n").unwrap();

        let buffer = Buffer::from_file(&path).unwrap();
        assert_eq!(buffer.name(), "main.c");
        assert_eq!(buffer.filename(), Some(path.as_path()));
        assert_eq!(buffer.line_count(), 1);

        assert!(Buffer::from_file(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_line_edits() {
        let mut buffer = Buffer::from_text("test", "a\nb");
        buffer.insert_line(1, "x");
        buffer.insert_line(99, "z");
        assert_eq!(buffer.text(), "a\nx\nb\nz");

        buffer.set_line(0, "A");
        buffer.remove_line(2);
        assert_eq!(buffer.text(), "A\nx\nz");

        buffer.remove_line(0);
        buffer.remove_line(0);
        buffer.remove_line(0);
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_highlight_after_edit() {
        let def = block_comments();
        let comment = def.rules().regions[0];
        let hl = Highlighter::new(&def);
        let mut buffer = Buffer::from_text("test", "if x\n/* a\nif\n*/ if\nif");
        hl.highlight_buffer(&mut buffer);
        assert_eq!(
            states(&buffer),
            vec![None, Some(comment), Some(comment), None, None]
        );

        // Closing the comment early changes line 1 and 2, then converges
        buffer.set_line(1, "/* a */");
        assert_eq!(hl.recompute_states(&mut buffer, 1), 3);
        assert_eq!(states(&buffer), fresh_states(&hl, &buffer));

        hl.recompute_matches(&mut buffer, 0..5);
        let line2 = buffer.line(2).unwrap().matches().unwrap();
        assert_eq!(group_at(line2, 0), Group::intern("buf.keyword"));
    }

    #[test]
    fn test_edit_inside_line_converges() {
        let def = block_comments();
        let hl = Highlighter::new(&def);
        let mut buffer = Buffer::from_text("test", "if a\nif b\nif c\nif d");
        hl.highlight_buffer(&mut buffer);

        buffer.set_line(1, "if bb");
        assert_eq!(hl.recompute_states(&mut buffer, 1), 1);
        assert!(buffer.line(1).unwrap().matches().is_none());
        hl.recompute_line(&mut buffer, 1);
        assert!(buffer.line(1).unwrap().matches().is_some());
    }

    #[test]
    fn test_insert_and_remove_keep_states_consistent() {
        let def = block_comments();
        let hl = Highlighter::new(&def);
        let mut buffer = Buffer::from_text("test", "/*\nx\ny\n*/\nz");
        hl.highlight_buffer(&mut buffer);

        // A line that closes the comment changes everything after it
        buffer.insert_line(1, "*/");
        hl.recompute_states(&mut buffer, 1);
        assert_eq!(states(&buffer), fresh_states(&hl, &buffer));

        // A plain line inherits the state above and stops immediately
        buffer.insert_line(3, "w");
        assert_eq!(hl.recompute_states(&mut buffer, 3), 1);
        assert_eq!(states(&buffer), fresh_states(&hl, &buffer));

        buffer.remove_line(1);
        hl.recompute_states(&mut buffer, 1);
        assert_eq!(states(&buffer), fresh_states(&hl, &buffer));
    }

    #[test]
    fn test_recompute_after_removing_tail() {
        let def = block_comments();
        let hl = Highlighter::new(&def);
        let mut buffer = Buffer::from_text("test", "a\n/*\nb");
        hl.highlight_buffer(&mut buffer);

        buffer.remove_line(2);
        buffer.remove_line(1);
        // The edit point is now past the last line
        assert_eq!(hl.recompute_states(&mut buffer, 2), 0);
        assert_eq!(hl.recompute_states(&mut buffer, 1), 0);
        hl.recompute_matches(&mut buffer, 1..3);
        assert_eq!(states(&buffer), vec![None]);
    }
}
