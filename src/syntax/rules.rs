//! Grammar rules for syntax highlighting
//!
//! This module defines the compiled building blocks of a grammar:
//! anchor-aware matchers, single-line patterns, multi-line regions and
//! the rule sets that hold them.

use std::borrow::Cow;
use std::fmt;

use regex::{Captures, Regex};

use super::group::Group;

/// Character substituted for text hidden by a region's skip matcher
const SKIP_FILLER: char = '\0';

/// A compiled regular expression that knows whether it is anchored
///
/// Highlighting runs the same matcher over slices of a line. A slice that
/// does not begin at the physical start of the line must not let `^` match,
/// and one that does not end at the physical end must not let `$` match, so
/// anchored matchers are simply not tried in those positions.
#[derive(Clone)]
pub struct Matcher {
    regex: Regex,
    anchored_start: bool,
    anchored_end: bool,
}

impl Matcher {
    /// Compile a matcher
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let (anchored_start, anchored_end) = scan_anchors(pattern);
        Ok(Self {
            regex,
            anchored_start,
            anchored_end,
        })
    }

    /// Source text of the pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern contains a start-of-line anchor
    pub fn is_anchored_start(&self) -> bool {
        self.anchored_start
    }

    /// Whether the pattern contains an end-of-line anchor
    pub fn is_anchored_end(&self) -> bool {
        self.anchored_end
    }

    fn allowed(&self, can_match_start: bool, can_match_end: bool) -> bool {
        (can_match_start || !self.anchored_start) && (can_match_end || !self.anchored_end)
    }

    /// Find the first match in `text`, returned as a rune range
    ///
    /// When `skip` is given, every match of it is blanked out with filler of
    /// the same rune count before searching, so escaped delimiters cannot
    /// match while column positions stay aligned.
    pub fn find(
        &self,
        text: &str,
        skip: Option<&Matcher>,
        can_match_start: bool,
        can_match_end: bool,
    ) -> Option<(usize, usize)> {
        if !self.allowed(can_match_start, can_match_end) {
            return None;
        }

        let haystack: Cow<'_, str> = match skip {
            Some(skip) => skip.regex.replace_all(text, |caps: &Captures| {
                let count = caps[0].chars().count();
                std::iter::repeat(SKIP_FILLER).take(count).collect::<String>()
            }),
            None => Cow::Borrowed(text),
        };

        self.regex
            .find(&haystack)
            .map(|m| (rune_pos(&haystack, m.start()), rune_pos(&haystack, m.end())))
    }

    /// Find every non-overlapping match in `text`, returned as rune ranges
    pub fn find_all(
        &self,
        text: &str,
        can_match_start: bool,
        can_match_end: bool,
    ) -> Vec<(usize, usize)> {
        if !self.allowed(can_match_start, can_match_end) {
            return Vec::new();
        }

        // Byte offsets arrive in increasing order, so convert incrementally
        let mut runes = 0;
        let mut byte = 0;
        let mut to_rune = |target: usize| {
            runes += text[byte..target].chars().count();
            byte = target;
            runes
        };

        let mut ranges = Vec::new();
        for m in self.regex.find_iter(text) {
            let start = to_rune(m.start());
            let end = to_rune(m.end());
            ranges.push((start, end));
        }
        ranges
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.regex.as_str()).finish()
    }
}

/// Detect `^`/`\A` and `$`/`\z` outside of escapes and character classes
fn scan_anchors(pattern: &str) -> (bool, bool) {
    let mut start = false;
    let mut end = false;
    let mut class_depth = 0usize;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('A') if class_depth == 0 => start = true,
                Some('z') if class_depth == 0 => end = true,
                _ => {}
            },
            '[' => {
                class_depth += 1;
                // A leading ']' (or '^]') is a literal, not the class end
                if chars.peek() == Some(&'^') {
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    chars.next();
                }
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '^' if class_depth == 0 => start = true,
            '$' if class_depth == 0 => end = true,
            _ => {}
        }
    }

    (start, end)
}

/// Rune index of a byte offset
pub(crate) fn rune_pos(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Byte offset of a rune index, clamped to the end of the text
pub(crate) fn byte_pos(text: &str, rune: usize) -> usize {
    text.char_indices()
        .nth(rune)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Index of a region inside its grammar's region arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) u32);

impl RegionId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single-line pattern
///
/// Every match of the regex is painted with the pattern's group.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub group: Group,
    pub matcher: Matcher,
}

/// A multi-line capable scope (block comments, strings)
///
/// Inside a region only the region's own rules apply; the enclosing
/// scope's rules do not.
#[derive(Debug, Clone)]
pub struct Region {
    /// Group for the region body
    pub group: Group,
    /// Group for the start and end delimiters
    pub limit_group: Group,
    /// Enclosing region, `None` at the top level
    pub parent: Option<RegionId>,
    pub start: Matcher,
    pub end: Matcher,
    /// Text that must never be taken as `end` (escape sequences)
    pub skip: Option<Matcher>,
    pub rules: Rules,
}

/// Patterns and regions that apply within one scope
#[derive(Debug, Clone, Default)]
pub struct Rules {
    /// Later patterns win where matches overlap
    pub patterns: Vec<Pattern>,
    pub regions: Vec<RegionId>,
    /// Languages whose top-level rules are merged in by include resolution
    pub includes: Vec<String>,
}

impl Rules {
    /// Check if this scope has nothing to match
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_find() {
        let matcher = Matcher::new(r"\d+").unwrap();
        assert_eq!(matcher.find("abc 123 def", None, true, true), Some((4, 7)));
        assert_eq!(matcher.find("no numbers", None, true, true), None);
    }

    #[test]
    fn test_matcher_find_reports_runes() {
        let matcher = Matcher::new("b").unwrap();
        // 'é' is two bytes but one rune
        assert_eq!(matcher.find("éab", None, true, true), Some((2, 3)));
    }

    #[test]
    fn test_matcher_find_all() {
        let matcher = Matcher::new(r"\d+").unwrap();
        assert_eq!(
            matcher.find_all("1 ü 22 333", true, true),
            vec![(0, 1), (4, 6), (7, 10)]
        );
    }

    #[test]
    fn test_anchor_gating() {
        let start = Matcher::new("^foo").unwrap();
        assert!(start.is_anchored_start());
        assert_eq!(start.find("foo", None, true, true), Some((0, 3)));
        assert_eq!(start.find("foo", None, false, true), None);
        assert!(start.find_all("foo", false, true).is_empty());

        let end = Matcher::new("bar$").unwrap();
        assert!(end.is_anchored_end());
        assert_eq!(end.find("bar", None, true, true), Some((0, 3)));
        assert_eq!(end.find("bar", None, true, false), None);
    }

    #[test]
    fn test_scan_anchors() {
        assert_eq!(scan_anchors("^foo"), (true, false));
        assert_eq!(scan_anchors("foo$"), (false, true));
        assert_eq!(scan_anchors(r"\Afoo\z"), (true, true));
        assert_eq!(scan_anchors(r#"[^"]+"#), (false, false));
        assert_eq!(scan_anchors(r"\^\$"), (false, false));
        assert_eq!(scan_anchors(r"[$]"), (false, false));
        assert_eq!(scan_anchors(r"[]^]x$"), (false, true));
        assert_eq!(scan_anchors(r"(a|^b)"), (true, false));
    }

    #[test]
    fn test_skip_hides_escaped_end() {
        let end = Matcher::new(r#"""#).unwrap();
        let skip = Matcher::new(r"\\.").unwrap();
        // Escaped quote
        assert_eq!(end.find(r#"a\"b""#, Some(&skip), true, true), Some((4, 5)));
        // Without skip the escaped quote ends the region
        assert_eq!(end.find(r#"a\"b""#, None, true, true), Some((2, 3)));
    }

    #[test]
    fn test_skip_keeps_rune_columns() {
        let end = Matcher::new("x").unwrap();
        let skip = Matcher::new("é+").unwrap();
        assert_eq!(end.find("ééx", Some(&skip), true, true), Some((2, 3)));
    }

    #[test]
    fn test_rune_helpers() {
        assert_eq!(rune_pos("aéb", 3), 2);
        assert_eq!(byte_pos("aéb", 2), 3);
        assert_eq!(byte_pos("aéb", 10), 4);
    }
}
