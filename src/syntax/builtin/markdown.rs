//! Markdown language definition
//!
//! Fenced code blocks tagged with a known language include that
//! language's rules.

pub const SOURCE: &str = r##"
filetype: markdown
detect:
    filename: '\.(md|mkd|mkdn|markdown)$'
rules:
    - special: '^#{1,6}.*'
    - special: '^(=+|-+)$'
    - statement: '^[[:space:]]*([*+-]|[0-9]+\.)[[:space:]]'
    - type.emphasis: '\*[^*[:space:]][^*]*\*'
    - type.emphasis: '\b_[^_[:space:]][^_]*_\b'
    - type: '(\*\*|__)[^*_]+(\*\*|__)'
    - underlined: '\[[^\]]*\]\([^)]*\)'
    - constant: '`[^`]+`'
    - comment: '^>.*'

    - code:
        start: '^```[[:space:]]*(rust|rs)[[:space:]]*$'
        end: '^```[[:space:]]*$'
        limit-group: special
        rules:
            - include: 'rust'

    - code:
        start: '^```[[:space:]]*(c|cpp|c\+\+|h)[[:space:]]*$'
        end: '^```[[:space:]]*$'
        limit-group: special
        rules:
            - include: 'c'

    - code:
        start: '^```[[:space:]]*(python|py)[[:space:]]*$'
        end: '^```[[:space:]]*$'
        limit-group: special
        rules:
            - include: 'python'

    - code:
        start: '^```'
        end: '^```[[:space:]]*$'
        limit-group: special

    - comment:
        start: '<!--'
        end: '-->'
"##;
