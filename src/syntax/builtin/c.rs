//! C/C++ language definition

pub const SOURCE: &str = r##"
filetype: c
detect:
    filename: '\.(c|h|cc|cpp|cxx|hpp|hh|ii?|def)$'
rules:
    - identifier: '\b[A-Z_][0-9A-Z_]+\b'
    - type: '\b(auto|float|double|char|int|short|long|sizeof|enum|void|static|const|struct|union|typedef|extern|(un)?signed|inline|register|volatile|restrict|_Bool)\b'
    - type: '\b((s?size)|ptrdiff|((u_?)?int(8|16|32|64|ptr)))_t\b'
    - type: '\b(class|namespace|template|typename|public|private|protected|virtual|friend|operator|using|bool|constexpr|nullptr|this|new|delete)\b'
    - statement: '\b(for|if|while|do|else|case|default|switch|try|catch|throw)\b'
    - statement: '\b(goto|continue|break|return)\b'
    - preproc: '^[[:space:]]*#[[:space:]]*(define|pragma|include|(un|ifn?)def|endif|el(if|se)|if|warning|error|line)'
    - constant: '\b(true|false|NULL)\b'
    - constant: "'([^'\\\\]|(\\\\[\"'abfnrtv\\\\]))'"
    - constant.number: '\b([0-9]+|0x[0-9a-fA-F]+)[uUlL]*\b'
    - constant.number: '\b[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]?\b'
    - symbol.operator: '[-+*/%=<>!&|^~?:]'
    - symbol.brackets: '[(){}\[\]]'

    - constant.string:
        start: '"'
        end: '"'
        skip: '\\.'
        rules:
            - constant.specialChar: '\\([\\"''abfnrtv]|[0-3]?[0-7]{1,2}|x[0-9A-Fa-f]{1,2}|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8})'

    - comment:
        start: '//'
        end: '$'
        rules:
            - todo: '(TODO|XXX|FIXME):?'

    - comment:
        start: '/\*'
        end: '\*/'
        rules:
            - todo: '(TODO|XXX|FIXME):?'
"##;
