//! Rust language definition

pub const SOURCE: &str = r##"
filetype: rust
detect:
    filename: '\.rs$'
rules:
    - identifier: '\bfn [a-z0-9_]+'
    - statement: '\b(as|async|await|break|const|continue|crate|dyn|else|enum|extern|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|self|Self|static|struct|super|trait|type|unsafe|use|where|while|yield)\b'
    - special: '\b[a-z_][a-z0-9_]*!'
    - constant: '\b[A-Z][A-Z_0-9]+\b'
    - constant: '\b(true|false|None|Some|Ok|Err)\b'
    - type: '\b(bool|char|str|u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64)\b'
    - type: '\b[A-Z][A-Za-z0-9]*[a-z][A-Za-z0-9]*\b'
    - constant.number: '\b[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?(u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64)?\b'
    - constant.number: '\b0(x[0-9A-Fa-f_]+|o[0-7_]+|b[01_]+)\b'
    - special: '''[a-z_][a-z0-9_]*\b'
    - constant: "'(\\\\.|[^'\\\\])'"
    - preproc: '#!?\[[^\]]*\]'
    - symbol.operator: '[-+*/%=<>!&|^?]|::|=>|->'

    - constant.string:
        start: 'r#"'
        end: '"#'

    - constant.string:
        start: 'b?"'
        end: '"'
        skip: '\\.'
        rules:
            - constant.specialChar: '\\([nrt0\\''"]|x[0-9A-Fa-f]{2}|u\{[0-9A-Fa-f]{1,6}\})'

    - comment:
        start: '//'
        end: '$'
        rules:
            - todo: '(TODO|XXX|FIXME|SAFETY):?'

    - comment:
        start: '/\*'
        end: '\*/'
        rules:
            - todo: '(TODO|XXX|FIXME):?'
"##;
