//! TOML language definition
//!
//! Written in TOML itself, which also keeps the TOML grammar loader in use.

pub const SOURCE: &str = r##"
filetype = "toml"

[detect]
filename = '\.toml$'

[[rules]]
identifier = '^[[:space:]]*[A-Za-z0-9_."-]+[[:space:]]*='

[[rules]]
special = '^[[:space:]]*\[\[?[^\]]*\]\]?'

[[rules]]
constant = '\b(true|false|inf|nan)\b'

[[rules]]
"constant.number" = '[+-]?\b[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?\b'

[[rules]]
"constant.number" = '\b[0-9]{4}-[0-9]{2}-[0-9]{2}([T ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?)?\b'

[[rules]]
"constant.string" = { start = '"""', end = '"""', skip = '\\.' }

[[rules]]
"constant.string" = { start = "'''", end = "'''" }

[[rules]]
"constant.string" = { start = '"', end = '"', skip = '\\.', rules = [{ "constant.specialChar" = '\\([btnfr"\\]|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8})' }] }

[[rules]]
"constant.string" = { start = "'", end = "'" }

[[rules]]
comment = { start = '#', end = '$', rules = [{ todo = '(TODO|XXX|FIXME):?' }] }
"##;
