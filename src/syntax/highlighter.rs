//! Line highlighter
//!
//! Highlighting works one line at a time. The only thing carried from one
//! line to the next is the [`State`]: the region that was still open at the
//! end of the previous line. Because every region knows its enclosing
//! region, that single ID is enough to rebuild the whole nesting stack.
//!
//! Within a line the matcher is recursive. It looks for whatever would end
//! or open a scope first, splits the line there, colors the part before the
//! split in the current scope and continues after the split in the new one.
//! Slices produced this way are not real line boundaries, so `^` may only
//! match when a slice starts at column 0 and `$` only when a slice runs to
//! the physical end of the line.

use std::collections::BTreeMap;

use super::group::Group;
use super::language::SyntaxDef;
use super::rules::{byte_pos, RegionId, Rules};

/// Group changes within one line, keyed by rune column
///
/// Each entry means "from this column on, use this group", until the next
/// entry or the end of the line.
pub type LineMatch = BTreeMap<usize, Group>;

/// Region open at the end of a line, `None` at the top level
pub type State = Option<RegionId>;

/// Where matching output goes during one pass over a line
///
/// A states-only pass has no sink and skips painting altogether.
struct Pass<'m> {
    matches: Option<&'m mut LineMatch>,
}

impl Pass<'_> {
    fn states_only(&self) -> bool {
        self.matches.is_none()
    }

    fn mark(&mut self, column: usize, group: Group) {
        if let Some(matches) = self.matches.as_deref_mut() {
            matches.insert(column, group);
        }
    }

    fn mark_if_absent(&mut self, column: usize, group: Group) {
        if let Some(matches) = self.matches.as_deref_mut() {
            matches.entry(column).or_insert(group);
        }
    }
}

/// Highlights lines with one language definition
///
/// Holds no mutable state: the state at the end of a line is returned to
/// the caller, so a highlighter can be copied and shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'d> {
    def: &'d SyntaxDef,
}

impl<'d> Highlighter<'d> {
    /// Create a highlighter for a language
    pub fn new(def: &'d SyntaxDef) -> Self {
        Self { def }
    }

    /// The language this highlighter uses
    pub fn def(&self) -> &'d SyntaxDef {
        self.def
    }

    /// Highlight a single line
    ///
    /// `prev` is the state at the end of the previous line (`None` for the
    /// first line). Returns the line's group changes and its end state.
    pub fn highlight_line(&self, text: &str, prev: State) -> (LineMatch, State) {
        let mut matches = LineMatch::new();
        let state = self.run(&mut Pass { matches: Some(&mut matches) }, text, prev);
        (matches, state)
    }

    /// Compute only the state at the end of a line
    pub fn line_state(&self, text: &str, prev: State) -> State {
        self.run(&mut Pass { matches: None }, text, prev)
    }

    /// Highlight every line of a string, threading state line to line
    pub fn highlight_string(&self, input: &str) -> Vec<LineMatch> {
        let mut state = None;
        input
            .split('\n')
            .map(|line| {
                let (matches, next) = self.highlight_line(line, state);
                state = next;
                matches
            })
            .collect()
    }

    fn run(&self, pass: &mut Pass<'_>, text: &str, prev: State) -> State {
        match prev {
            Some(region) => self.match_region(pass, 0, true, text, region),
            None => self.match_top_level(pass, 0, true, text),
        }
    }

    /// Match a slice of a line that starts inside `region`
    ///
    /// `offset` is the rune column of the slice within the line and
    /// `can_match_end` tells whether the slice runs to the end of the line.
    fn match_region(
        &self,
        pass: &mut Pass<'_>,
        offset: usize,
        can_match_end: bool,
        line: &str,
        region_id: RegionId,
    ) -> State {
        let region = self.def.region(region_id);
        let can_match_start = offset == 0;

        if can_match_start {
            pass.mark_if_absent(0, region.group);
        }

        if let Some((start, end)) =
            region
                .end
                .find(line, region.skip.as_ref(), can_match_start, can_match_end)
        {
            // The text before the end delimiter is still inside the region
            if start > 0 && !pass.states_only() {
                self.match_region(pass, offset, false, prefix(line, start), region_id);
            }
            pass.mark(offset + start, region.limit_group);

            let rest = suffix(line, end);
            return match region.parent {
                None => {
                    pass.mark(offset + end, Group::NONE);
                    self.match_top_level(pass, offset + end, can_match_end, rest)
                }
                Some(parent) => {
                    pass.mark(offset + end, self.def.region(parent).group);
                    self.match_region(pass, offset + end, can_match_end, rest, parent)
                }
            };
        }

        if line.is_empty() {
            return Some(region_id);
        }

        if let Some((child, start, end)) =
            self.first_region_start(&region.rules, line, can_match_start, can_match_end)
        {
            if !pass.states_only() {
                self.match_region(pass, offset, false, prefix(line, start), region_id);
            }
            pass.mark(offset + start, self.def.region(child).limit_group);
            return self.match_region(pass, offset + end, can_match_end, suffix(line, end), child);
        }

        if !pass.states_only() {
            paint(
                pass,
                offset,
                line,
                &region.rules,
                region.group,
                can_match_start,
                can_match_end,
            );
        }
        Some(region_id)
    }

    /// Match a slice of a line that starts outside of any region
    fn match_top_level(
        &self,
        pass: &mut Pass<'_>,
        offset: usize,
        can_match_end: bool,
        line: &str,
    ) -> State {
        if line.is_empty() {
            return None;
        }
        let can_match_start = offset == 0;

        if let Some((child, start, end)) =
            self.first_region_start(&self.def.rules, line, can_match_start, can_match_end)
        {
            if !pass.states_only() {
                self.match_top_level(pass, offset, false, prefix(line, start));
            }
            pass.mark(offset + start, self.def.region(child).limit_group);
            return self.match_region(pass, offset + end, can_match_end, suffix(line, end), child);
        }

        if !pass.states_only() {
            paint(
                pass,
                offset,
                line,
                &self.def.rules,
                Group::NONE,
                can_match_start,
                can_match_end,
            );
        }
        None
    }

    /// Find the region in `rules` whose start matches earliest in `line`
    ///
    /// Ties go to the region declared first. A start must begin before the
    /// end of the line and consume at least one rune.
    fn first_region_start(
        &self,
        rules: &Rules,
        line: &str,
        can_match_start: bool,
        can_match_end: bool,
    ) -> Option<(RegionId, usize, usize)> {
        let line_len = line.chars().count();
        let mut first: Option<(RegionId, usize, usize)> = None;

        for &id in &rules.regions {
            let region = self.def.region(id);
            let Some((start, end)) = region.start.find(line, None, can_match_start, can_match_end)
            else {
                continue;
            };
            if start == end || start >= line_len {
                continue;
            }
            if first.map_or(true, |(_, best, _)| start < best) {
                first = Some((id, start, end));
            }
        }

        first
    }
}

/// Paint a slice that opens no region
///
/// Every rune starts as `base`; each pattern then overwrites the runes it
/// matches, in declaration order. Only the changes are recorded.
fn paint(
    pass: &mut Pass<'_>,
    offset: usize,
    line: &str,
    rules: &Rules,
    base: Group,
    can_match_start: bool,
    can_match_end: bool,
) {
    let mut groups = vec![base; line.chars().count()];

    for pattern in &rules.patterns {
        for (start, end) in pattern.matcher.find_all(line, can_match_start, can_match_end) {
            for group in &mut groups[start..end] {
                *group = pattern.group;
            }
        }
    }

    for (i, &group) in groups.iter().enumerate() {
        if i == 0 || group != groups[i - 1] {
            pass.mark(offset + i, group);
        }
    }
}

/// The first `runes` runes of `line`
fn prefix(line: &str, runes: usize) -> &str {
    &line[..byte_pos(line, runes)]
}

/// Everything after the first `runes` runes of `line`
fn suffix(line: &str, runes: usize) -> &str {
    &line[byte_pos(line, runes)..]
}

/// Group in effect at `column` according to a line's matches
pub fn group_at(matches: &LineMatch, column: usize) -> Group {
    matches
        .range(..=column)
        .next_back()
        .map_or(Group::NONE, |(_, &group)| group)
}
