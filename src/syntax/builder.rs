//! Grammar construction
//!
//! Turns a decoded [`RuleSpec`] tree into compiled [`Rules`] and an arena of
//! [`Region`]s, and merges `include`d languages into a finished grammar.

use std::borrow::Borrow;

use super::format::{RegionSpec, RuleSpec};
use super::group::Group;
use super::language::SyntaxDef;
use super::rules::{Matcher, Pattern, Region, RegionId, Rules};
use crate::error::GrammarError;

/// Builds the rule tree of one grammar
///
/// Regions are appended to an arena as they are built so that nested rules
/// can refer to their enclosing region by ID.
#[derive(Default)]
pub(crate) struct Builder {
    regions: Vec<Region>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Build the rules for one scope
    ///
    /// `enclosing` is the region that owns this scope, `None` at the top level.
    pub(crate) fn build_rules(
        &mut self,
        specs: &[RuleSpec],
        enclosing: Option<RegionId>,
    ) -> Result<Rules, GrammarError> {
        let mut rules = Rules::default();

        for spec in specs {
            match spec {
                RuleSpec::Include(language) => rules.includes.push(language.clone()),
                RuleSpec::Pattern { group, regex } => {
                    let matcher = compile(group, regex)?;
                    rules.patterns.push(Pattern {
                        group: Group::intern(group),
                        matcher,
                    });
                }
                RuleSpec::Region { group, region } => {
                    let id = self.build_region(group, region, enclosing)?;
                    rules.regions.push(id);
                }
            }
        }

        Ok(rules)
    }

    /// Build a region and, recursively, everything nested inside it
    pub(crate) fn build_region(
        &mut self,
        name: &str,
        spec: &RegionSpec,
        enclosing: Option<RegionId>,
    ) -> Result<RegionId, GrammarError> {
        let start = spec.start.as_deref().ok_or_else(|| GrammarError::MissingField {
            key: name.to_string(),
            field: "start",
        })?;
        let end = spec.end.as_deref().ok_or_else(|| GrammarError::MissingField {
            key: name.to_string(),
            field: "end",
        })?;

        let group = Group::intern(name);
        let start = compile(name, start)?;
        let end = compile(name, end)?;
        let skip = spec
            .skip
            .as_deref()
            .map(|skip| compile(name, skip))
            .transpose()?;
        let limit_group = spec
            .limit_group
            .as_deref()
            .map_or(group, Group::intern);

        let id = RegionId(self.regions.len() as u32);
        self.regions.push(Region {
            group,
            limit_group,
            parent: enclosing,
            start,
            end,
            skip,
            rules: Rules::default(),
        });

        let rules = self.build_rules(&spec.rules, Some(id))?;
        self.regions[id.index()].rules = rules;

        Ok(id)
    }

    pub(crate) fn finish(self) -> Vec<Region> {
        self.regions
    }
}

fn compile(key: &str, pattern: &str) -> Result<Matcher, GrammarError> {
    Matcher::new(pattern).map_err(|source| GrammarError::Regex {
        key: key.to_string(),
        source,
    })
}

/// Merge included languages into `def`
///
/// Every include at the top level and in each region that exists when this
/// is called is looked up by filetype in `known`; the included grammar's
/// top-level patterns and regions are appended to the including scope.
/// Included grammars are taken as they are: their own includes are not
/// followed. Returns the names that matched no known grammar.
pub fn resolve_includes<D: Borrow<SyntaxDef>>(def: &mut SyntaxDef, known: &[D]) -> Vec<String> {
    let mut missing = Vec::new();
    let existing = def.regions.len();

    let includes = def.rules.includes.clone();
    for language in &includes {
        match find_language(known, language) {
            Some(included) => {
                let merged = merge_scope(&mut def.regions, included, None);
                def.rules.patterns.extend(merged.patterns);
                def.rules.regions.extend(merged.regions);
            }
            None => missing.push(language.clone()),
        }
    }

    for index in 0..existing {
        let id = RegionId(index as u32);
        let includes = def.regions[index].rules.includes.clone();
        for language in &includes {
            match find_language(known, language) {
                Some(included) => {
                    let merged = merge_scope(&mut def.regions, included, Some(id));
                    let scope = &mut def.regions[index].rules;
                    scope.patterns.extend(merged.patterns);
                    scope.regions.extend(merged.regions);
                }
                None => missing.push(language.clone()),
            }
        }
    }

    relink_parents(def);

    for language in &missing {
        tracing::warn!(
            "Syntax '{}' includes unknown language '{}'",
            def.filetype,
            language
        );
    }
    missing
}

fn find_language<'a, D: Borrow<SyntaxDef>>(
    known: &'a [D],
    language: &str,
) -> Option<&'a SyntaxDef> {
    known
        .iter()
        .map(Borrow::borrow)
        .find(|def| def.filetype == language)
}

/// Copy the top-level rules of `included` into `arena`
///
/// Returned region IDs refer to `arena` and have `parent` as their parent.
fn merge_scope(arena: &mut Vec<Region>, included: &SyntaxDef, parent: Option<RegionId>) -> Rules {
    let regions = included
        .rules
        .regions
        .iter()
        .map(|&id| graft(arena, included, id, parent))
        .collect();

    Rules {
        patterns: included.rules.patterns.clone(),
        regions,
        includes: Vec::new(),
    }
}

/// Deep-copy a region subtree from another grammar into `arena`
fn graft(
    arena: &mut Vec<Region>,
    source: &SyntaxDef,
    id: RegionId,
    parent: Option<RegionId>,
) -> RegionId {
    let original = source.region(id);
    let new_id = RegionId(arena.len() as u32);

    let mut copy = original.clone();
    copy.parent = parent;
    copy.rules.regions = Vec::new();
    arena.push(copy);

    let children = original
        .rules
        .regions
        .iter()
        .map(|&child| graft(arena, source, child, Some(new_id)))
        .collect();
    arena[new_id.index()].rules.regions = children;

    new_id
}

/// Top-level regions have no parent; every nested region points at the
/// region whose rules list it.
fn relink_parents(def: &mut SyntaxDef) {
    for &id in &def.rules.regions {
        def.regions[id.index()].parent = None;
    }
    for index in 0..def.regions.len() {
        let children = def.regions[index].rules.regions.clone();
        for child in children {
            def.regions[child.index()].parent = Some(RegionId(index as u32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::format::{SyntaxFile, SyntaxFormat};

    fn def(source: &str) -> SyntaxDef {
        let file = SyntaxFile::parse(source, SyntaxFormat::Yaml, "test").unwrap();
        SyntaxDef::from_file(&file).unwrap()
    }

    fn region_spec(start: Option<&str>, end: Option<&str>) -> RegionSpec {
        RegionSpec {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            skip: None,
            limit_group: None,
            rules: Vec::new(),
        }
    }

    #[test]
    fn test_build_rules_keeps_order() {
        let specs = vec![
            RuleSpec::Pattern {
                group: "build.first".to_string(),
                regex: "a".to_string(),
            },
            RuleSpec::Include("other".to_string()),
            RuleSpec::Pattern {
                group: "build.second".to_string(),
                regex: "b".to_string(),
            },
        ];
        let mut builder = Builder::new();
        let rules = builder.build_rules(&specs, None).unwrap();
        assert_eq!(rules.patterns.len(), 2);
        assert_eq!(rules.patterns[0].group, Group::intern("build.first"));
        assert_eq!(rules.patterns[1].group, Group::intern("build.second"));
        assert_eq!(rules.includes, vec!["other".to_string()]);
        assert!(builder.finish().is_empty());
    }

    #[test]
    fn test_build_region_defaults_limit_group() {
        let mut builder = Builder::new();
        let id = builder
            .build_region("build.string", &region_spec(Some("\""), Some("\"")), None)
            .unwrap();
        let regions = builder.finish();
        let region = &regions[id.index()];
        assert_eq!(region.group, Group::intern("build.string"));
        assert_eq!(region.limit_group, region.group);
        assert!(region.parent.is_none());
        assert!(region.skip.is_none());
    }

    #[test]
    fn test_missing_end_is_error() {
        let mut builder = Builder::new();
        let err = builder
            .build_region("build.comment", &region_spec(Some("/\\*"), None), None)
            .unwrap_err();
        assert!(matches!(
            err,
            GrammarError::MissingField { ref key, field: "end" } if key == "build.comment"
        ));
    }

    #[test]
    fn test_missing_start_is_error() {
        let mut builder = Builder::new();
        let err = builder
            .build_region("build.comment", &region_spec(None, Some("x")), None)
            .unwrap_err();
        assert!(matches!(err, GrammarError::MissingField { field: "start", .. }));
    }

    #[test]
    fn test_bad_regex_names_key() {
        let specs = vec![
            RuleSpec::Pattern {
                group: "build.ok".to_string(),
                regex: "ok".to_string(),
            },
            RuleSpec::Pattern {
                group: "build.broken".to_string(),
                regex: "(unclosed".to_string(),
            },
        ];
        let err = Builder::new().build_rules(&specs, None).unwrap_err();
        assert_eq!(err.key(), "build.broken");
    }

    #[test]
    fn test_nested_region_error_propagates() {
        let mut outer = region_spec(Some("<"), Some(">"));
        outer.rules.push(RuleSpec::Region {
            group: "build.inner".to_string(),
            region: region_spec(Some("["), Some("(")),
        });
        let specs = vec![RuleSpec::Region {
            group: "build.outer".to_string(),
            region: outer,
        }];
        let err = Builder::new().build_rules(&specs, None).unwrap_err();
        assert_eq!(err.key(), "build.inner");
    }

    #[test]
    fn test_nested_region_parent() {
        let d = def(r#"
filetype: nest
rules:
    - build.a:
        start: "<"
        end: ">"
        rules:
            - build.b:
                start: "\\["
                end: "\\]"
"#);
        let a = d.rules().regions[0];
        let b = d.region(a).rules.regions[0];
        assert_eq!(d.region(a).parent, None);
        assert_eq!(d.region(b).parent, Some(a));
    }

    #[test]
    fn test_resolve_includes_top_level() {
        let base = def(r#"
filetype: base
rules:
    - build.keyword: "\\bfn\\b"
    - build.str:
        start: "\""
        end: "\""
"#);
        let mut host = def(r#"
filetype: host
rules:
    - include: "base"
    - build.number: "[0-9]+"
"#);

        let missing = resolve_includes(&mut host, &[base]);
        assert!(missing.is_empty());

        let rules = host.rules();
        assert_eq!(rules.patterns.len(), 2);
        assert_eq!(rules.patterns[0].group, Group::intern("build.number"));
        assert_eq!(rules.patterns[1].group, Group::intern("build.keyword"));
        assert_eq!(rules.regions.len(), 1);
        assert_eq!(host.region(rules.regions[0]).parent, None);
    }

    #[test]
    fn test_resolve_includes_in_region() {
        let inner = def(r#"
filetype: inner
rules:
    - build.word: "\\w+"
    - build.paren:
        start: "\\("
        end: "\\)"
        rules:
            - build.bracket:
                start: "\\["
                end: "\\]"
"#);
        let mut host = def(r#"
filetype: host
rules:
    - build.fence:
        start: "```"
        end: "```"
        rules:
            - include: "inner"
"#);

        let missing = resolve_includes(&mut host, &[inner]);
        assert!(missing.is_empty());

        let fence = host.rules().regions[0];
        let scope = &host.region(fence).rules;
        assert_eq!(scope.patterns.len(), 1);
        assert_eq!(scope.regions.len(), 1);

        let paren = scope.regions[0];
        assert_eq!(host.region(paren).parent, Some(fence));
        let bracket = host.region(paren).rules.regions[0];
        assert_eq!(host.region(bracket).parent, Some(paren));
    }

    #[test]
    fn test_unknown_include_is_noop() {
        let mut host = def(r#"
filetype: host
rules:
    - include: "nowhere"
    - build.number: "[0-9]+"
"#);
        let known: [SyntaxDef; 0] = [];
        let missing = resolve_includes(&mut host, &known);
        assert_eq!(missing, vec!["nowhere".to_string()]);
        assert_eq!(host.rules().patterns.len(), 1);
        assert!(host.rules().regions.is_empty());
    }

    #[test]
    fn test_includes_are_not_transitive() {
        let leaf = def("filetype: leaf\nrules:\n    - build.leaf: \"x\"\n");
        let middle = def(
            "filetype: middle\nrules:\n    - include: \"leaf\"\n    - build.middle: \"y\"\n",
        );
        let mut top = def("filetype: top\nrules:\n    - include: \"middle\"\n");

        resolve_includes(&mut top, &[leaf, middle]);
        let groups: Vec<Group> = top.rules().patterns.iter().map(|p| p.group).collect();
        assert_eq!(groups, vec![Group::intern("build.middle")]);
    }
}
