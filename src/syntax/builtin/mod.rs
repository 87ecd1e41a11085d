//! Built-in language definitions
//!
//! Grammar sources compiled into the binary. They go through the same
//! decoding and building path as grammars loaded from disk.

mod c;
mod markdown;
mod python;
mod rust;
mod toml_lang;

use super::format::SyntaxFormat;

/// Source of one built-in grammar
pub struct BuiltinSyntax {
    pub name: &'static str,
    pub format: SyntaxFormat,
    pub source: &'static str,
}

/// Get all built-in grammar sources
pub fn all_syntaxes() -> Vec<BuiltinSyntax> {
    vec![
        BuiltinSyntax {
            name: "rust",
            format: SyntaxFormat::Yaml,
            source: rust::SOURCE,
        },
        BuiltinSyntax {
            name: "c",
            format: SyntaxFormat::Yaml,
            source: c::SOURCE,
        },
        BuiltinSyntax {
            name: "python",
            format: SyntaxFormat::Yaml,
            source: python::SOURCE,
        },
        BuiltinSyntax {
            name: "toml",
            format: SyntaxFormat::Toml,
            source: toml_lang::SOURCE,
        },
        BuiltinSyntax {
            name: "markdown",
            format: SyntaxFormat::Yaml,
            source: markdown::SOURCE,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::format::SyntaxFile;
    use crate::syntax::language::SyntaxDef;

    #[test]
    fn test_all_builtins_compile() {
        for builtin in all_syntaxes() {
            let file = SyntaxFile::parse(builtin.source, builtin.format, builtin.name)
                .unwrap_or_else(|e| panic!("{}: {}", builtin.name, e));
            assert_eq!(file.filetype, builtin.name);
            let def = SyntaxDef::from_file(&file).unwrap_or_else(|e| panic!("{}", e));
            assert!(!def.rules().is_empty(), "{} has no rules", builtin.name);
            assert!(def.detect().is_some(), "{} has no detect section", builtin.name);
        }
    }
}
