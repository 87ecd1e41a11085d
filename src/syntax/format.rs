//! Grammar description format
//!
//! Grammar files are decoded with serde into a [`SyntaxFile`]. The rule list
//! is an ordered sequence of single-key maps:
//!
//! ```yaml
//! filetype: c
//! detect:
//!     filename: "\\.(c|h)$"
//! rules:
//!     - include: "doxygen"
//!     - statement: "\\b(if|else|while)\\b"
//!     - constant.string:
//!         start: "\""
//!         end: "\""
//!         skip: "\\\\."
//!         rules:
//!             - constant.specialChar: "\\\\."
//! ```
//!
//! Each entry is either an `include`, a pattern (group name to regex), or a
//! region (group name to a map with `start`, `end` and optional `skip`,
//! `limit-group` and `rules`). The shape is checked here, once, so the
//! builder only ever sees a [`RuleSpec`].

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::{HighlightError, Result};

/// A decoded grammar file
#[derive(Debug, Clone, Deserialize)]
pub struct SyntaxFile {
    pub filetype: String,
    #[serde(default)]
    pub detect: Option<DetectSpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// How to recognize files of this type
#[derive(Debug, Clone, Deserialize)]
pub struct DetectSpec {
    /// Regex matched against the file name
    pub filename: String,
    /// Regex matched against the first line of the file
    #[serde(default)]
    pub header: Option<String>,
}

/// One entry of a rule list
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    /// Merge another language's top-level rules into this scope
    Include(String),
    /// Single-line pattern
    Pattern { group: String, regex: String },
    /// Nested region
    Region { group: String, region: RegionSpec },
}

/// Body of a region entry
///
/// `start` and `end` are optional at this level so that a missing one is
/// reported by the builder against the region's name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegionSpec {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub skip: Option<String>,
    #[serde(default)]
    pub limit_group: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

/// Value side of a non-include rule entry
enum RuleValue {
    Pattern(String),
    Region(RegionSpec),
}

impl<'de> Deserialize<'de> for RuleValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RuleValueVisitor)
    }
}

struct RuleValueVisitor;

impl<'de> Visitor<'de> for RuleValueVisitor {
    type Value = RuleValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a regex string or a region map")
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<RuleValue, E>
    where
        E: de::Error,
    {
        Ok(RuleValue::Pattern(value.to_string()))
    }

    fn visit_map<A>(self, map: A) -> std::result::Result<RuleValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        RegionSpec::deserialize(de::value::MapAccessDeserializer::new(map)).map(RuleValue::Region)
    }
}

impl<'de> Deserialize<'de> for RuleSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RuleSpecVisitor)
    }
}

struct RuleSpecVisitor;

impl<'de> Visitor<'de> for RuleSpecVisitor {
    type Value = RuleSpec;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a single-key map of group name to regex or region")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<RuleSpec, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };

        let rule = if key == "include" {
            RuleSpec::Include(map.next_value()?)
        } else {
            match map.next_value::<RuleValue>() {
                Ok(RuleValue::Pattern(regex)) => RuleSpec::Pattern { group: key, regex },
                Ok(RuleValue::Region(region)) => RuleSpec::Region { group: key, region },
                Err(e) => {
                    return Err(de::Error::custom(format!(
                        "rule '{}' must be a regex string or a region map: {}",
                        key, e
                    )))
                }
            }
        };

        if let Some(extra) = map.next_key::<String>()? {
            return Err(de::Error::custom(format!(
                "rule '{}' has an unexpected second key '{}'",
                rule_key(&rule),
                extra
            )));
        }

        Ok(rule)
    }
}

fn rule_key(rule: &RuleSpec) -> &str {
    match rule {
        RuleSpec::Include(_) => "include",
        RuleSpec::Pattern { group, .. } => group,
        RuleSpec::Region { group, .. } => group,
    }
}

/// Supported grammar file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxFormat {
    Yaml,
    Toml,
}

impl SyntaxFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SyntaxFormat::Yaml),
            "toml" => Some(SyntaxFormat::Toml),
            _ => None,
        }
    }
}

impl SyntaxFile {
    /// Decode a grammar from source text
    ///
    /// `source_name` only appears in error messages.
    pub fn parse(source: &str, format: SyntaxFormat, source_name: &str) -> Result<Self> {
        let decoded = match format {
            SyntaxFormat::Yaml => serde_yaml::from_str(source).map_err(|e| e.to_string()),
            SyntaxFormat::Toml => toml::from_str(source).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| HighlightError::Decode {
            source_name: source_name.to_string(),
            message,
        })
    }

    /// Read and decode a grammar file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = SyntaxFormat::from_path(path)
            .ok_or_else(|| HighlightError::UnsupportedFormat(path.display().to_string()))?;
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source, format, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
filetype: test
detect:
    filename: "\\.test$"
rules:
    - include: "other"
    - statement: "\\b(if|else)\\b"
    - comment:
        start: "/\\*"
        end: "\\*/"
        limit-group: comment.delim
        rules:
            - todo: "TODO"
"#;

    #[test]
    fn test_parse_yaml() {
        let file = SyntaxFile::parse(YAML, SyntaxFormat::Yaml, "test.yaml").unwrap();
        assert_eq!(file.filetype, "test");
        assert_eq!(file.detect.as_ref().unwrap().filename, r"\.test$");
        assert!(file.detect.as_ref().unwrap().header.is_none());
        assert_eq!(file.rules.len(), 3);
        assert_eq!(file.rules[0], RuleSpec::Include("other".to_string()));
        assert_eq!(
            file.rules[1],
            RuleSpec::Pattern {
                group: "statement".to_string(),
                regex: r"\b(if|else)\b".to_string(),
            }
        );
        match &file.rules[2] {
            RuleSpec::Region { group, region } => {
                assert_eq!(group, "comment");
                assert_eq!(region.start.as_deref(), Some(r"/\*"));
                assert_eq!(region.end.as_deref(), Some(r"\*/"));
                assert_eq!(region.limit_group.as_deref(), Some("comment.delim"));
                assert!(region.skip.is_none());
                assert_eq!(region.rules.len(), 1);
            }
            other => panic!("expected region, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_toml() {
        let source = r#"
filetype = "ini"

[detect]
filename = "\\.ini$"

[[rules]]
comment = "^;.*$"

[[rules]]
"constant.string" = { start = '"', end = '"', skip = '\\.' }
"#;
        let file = SyntaxFile::parse(source, SyntaxFormat::Toml, "ini.toml").unwrap();
        assert_eq!(file.filetype, "ini");
        assert_eq!(file.rules.len(), 2);
        match &file.rules[1] {
            RuleSpec::Region { group, region } => {
                assert_eq!(group, "constant.string");
                assert_eq!(region.skip.as_deref(), Some(r"\\."));
                assert!(region.rules.is_empty());
            }
            other => panic!("expected region, got {:?}", other),
        }
    }

    #[test]
    fn test_region_without_end_decodes() {
        let source = "filetype: x\nrules:\n    - comment:\n        start: \"#\"\n";
        let file = SyntaxFile::parse(source, SyntaxFormat::Yaml, "x").unwrap();
        match &file.rules[0] {
            RuleSpec::Region { region, .. } => assert!(region.end.is_none()),
            other => panic!("expected region, got {:?}", other),
        }
    }

    #[test]
    fn test_two_keys_rejected() {
        let source = "filetype: x\nrules:\n    - a: \"a\"\n      b: \"b\"\n";
        let err = SyntaxFile::parse(source, SyntaxFormat::Yaml, "bad.yaml").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad.yaml"));
        assert!(message.contains("second key"));
    }

    #[test]
    fn test_bad_value_rejected() {
        let source = "filetype: x\nrules:\n    - number: [1, 2]\n";
        let err = SyntaxFile::parse(source, SyntaxFormat::Yaml, "bad.yaml").unwrap_err();
        assert!(err.to_string().contains("rule 'number'"));
    }

    #[test]
    fn test_nested_rule_error_is_reported() {
        let source = r#"
filetype: x
rules:
    - comment:
        start: "/\\*"
        end: "\\*/"
        rules:
            - todo: [1, 2]
"#;
        let err = SyntaxFile::parse(source, SyntaxFormat::Yaml, "nested.yaml").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("rule 'comment'"), "{}", message);
        assert!(message.contains("rule 'todo'"), "{}", message);
        assert!(message.contains("sequence"), "{}", message);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SyntaxFormat::from_path(Path::new("c.yaml")), Some(SyntaxFormat::Yaml));
        assert_eq!(SyntaxFormat::from_path(Path::new("c.YML")), Some(SyntaxFormat::Yaml));
        assert_eq!(SyntaxFormat::from_path(Path::new("c.toml")), Some(SyntaxFormat::Toml));
        assert_eq!(SyntaxFormat::from_path(Path::new("c.json")), None);
        assert_eq!(SyntaxFormat::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let err = SyntaxFile::load(Path::new("grammar.json")).unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedFormat(_)));
    }
}
