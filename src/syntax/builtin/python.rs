//! Python language definition

pub const SOURCE: &str = r##"
filetype: python
detect:
    filename: '\.py[23w]?$'
    header: '^#!.*/(env +)?python[23]?'
rules:
    - statement: '\b(and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b'
    - identifier: '\bdef [A-Za-z_][A-Za-z0-9_]*'
    - constant: '\b(None|True|False|self)\b'
    - type: '\b(int|float|complex|str|bytes|bool|list|dict|set|frozenset|tuple|object|type)\b'
    - preproc: '^[[:space:]]*@[A-Za-z_][A-Za-z0-9_.]*'
    - constant.number: '\b[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?j?\b'
    - constant.number: '\b0(x[0-9A-Fa-f_]+|o[0-7_]+|b[01_]+)\b'
    - symbol.operator: '[-+*/%=<>!&|^~]|//|\*\*'

    - constant.string:
        start: '[rbfu]?"""'
        end: '"""'

    - constant.string:
        start: "[rbfu]?'''"
        end: "'''"

    - constant.string:
        start: '[rbfu]?"'
        end: '"'
        skip: '\\.'
        rules:
            - constant.specialChar: '\\.'

    - constant.string:
        start: "[rbfu]?'"
        end: "'"
        skip: '\\.'
        rules:
            - constant.specialChar: '\\.'

    - comment:
        start: '#'
        end: '$'
        rules:
            - todo: '(TODO|XXX|FIXME):?'
"##;
