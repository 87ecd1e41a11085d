//! Incremental re-highlighting
//!
//! A buffer keeps, for every line, the state at the end of that line and
//! the line's group changes. After an edit only the lines whose state can
//! have changed need their state recomputed, and only visible lines need
//! their matches recomputed. The operations here drive a [`Highlighter`]
//! over anything that implements [`LineStorage`].

use std::ops::Range;

use super::highlighter::{Highlighter, LineMatch, State};

/// Line storage that can hold highlighting results
pub trait LineStorage {
    /// Number of lines
    fn line_count(&self) -> usize;

    /// Text of a line, without its newline
    fn line_text(&self, line: usize) -> &str;

    /// Stored end-of-line state
    fn state(&self, line: usize) -> State;

    /// Store the end-of-line state
    fn set_state(&mut self, line: usize, state: State);

    /// Store the group changes for a line
    fn set_match(&mut self, line: usize, matches: LineMatch);
}

impl Highlighter<'_> {
    /// Highlight every line from scratch
    ///
    /// Used when a buffer is first loaded.
    pub fn highlight_buffer<S: LineStorage + ?Sized>(&self, storage: &mut S) {
        let mut state = None;
        for line in 0..storage.line_count() {
            let (matches, next) = self.highlight_line(storage.line_text(line), state);
            storage.set_state(line, next);
            storage.set_match(line, matches);
            state = next;
        }
        tracing::debug!("Highlighted {} lines", storage.line_count());
    }

    /// Recompute end-of-line states starting at `from`
    ///
    /// Stops at the first line whose new state equals its stored state,
    /// since every later state was derived from it and is still valid.
    /// Matches are not touched. Returns the number of lines scanned.
    pub fn recompute_states<S: LineStorage + ?Sized>(&self, storage: &mut S, from: usize) -> usize {
        if from >= storage.line_count() {
            return 0;
        }
        let mut state = seed_state(storage, from);
        let mut scanned = 0;

        for line in from..storage.line_count() {
            scanned += 1;
            let next = self.line_state(storage.line_text(line), state);
            if next == storage.state(line) {
                break;
            }
            storage.set_state(line, next);
            state = next;
        }

        tracing::trace!("Recomputed states from line {}: {} lines scanned", from, scanned);
        scanned
    }

    /// Recompute matches for a range of lines
    ///
    /// States must already be correct. The range is clamped to the buffer.
    pub fn recompute_matches<S: LineStorage + ?Sized>(&self, storage: &mut S, lines: Range<usize>) {
        let end = lines.end.min(storage.line_count());
        for line in lines.start..end {
            let prev = seed_state(storage, line);
            let (matches, _) = self.highlight_line(storage.line_text(line), prev);
            storage.set_match(line, matches);
        }
    }

    /// Recompute the state and matches of exactly one line
    ///
    /// Later lines are left alone; follow up with
    /// [`recompute_states`](Self::recompute_states) if the state may have
    /// changed.
    pub fn recompute_line<S: LineStorage + ?Sized>(&self, storage: &mut S, line: usize) {
        if line >= storage.line_count() {
            return;
        }
        let prev = seed_state(storage, line);
        let (matches, state) = self.highlight_line(storage.line_text(line), prev);
        storage.set_match(line, matches);
        storage.set_state(line, state);
    }
}

/// State at the end of the line before `line`
fn seed_state<S: LineStorage + ?Sized>(storage: &S, line: usize) -> State {
    if line == 0 {
        None
    } else {
        storage.state(line - 1)
    }
}
