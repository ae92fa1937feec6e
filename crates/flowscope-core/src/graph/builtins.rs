//! Builtin, keyword and standard-library deny-list
//!
//! Call-shaped text whose name or qualifier is listed here is not a call
//! into project code and is dropped by both the call graph builder and the
//! data-flow tracer.

/// Go keywords that can precede a `(`
const KEYWORDS: &[&str] = &[
    "if", "for", "switch", "select", "case", "return", "go", "defer", "func", "range", "else",
    "var", "const", "type", "import", "package", "chan", "map", "struct", "interface", "break",
    "continue", "goto", "fallthrough", "default",
];

/// Predeclared functions and conversion type names
const BUILTINS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover", "string", "int", "int8",
    "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
    "float32", "float64", "byte", "rune", "bool", "error", "any", "complex64", "complex128",
];

/// Standard-library package qualifiers plus receivers that are almost always
/// stdlib values in handler code (`w.Write`, `r.URL`, `ctx.Done`)
const STDLIB_QUALIFIERS: &[&str] = &[
    "fmt", "strings", "strconv", "errors", "os", "io", "ioutil", "log", "slog", "time",
    "context", "sync", "atomic", "math", "rand", "sort", "slices", "maps", "bytes", "bufio",
    "json", "xml", "http", "url", "filepath", "path", "regexp", "reflect", "runtime", "unicode",
    "utf8", "hex", "base64", "binary", "sql", "template", "exec", "signal", "net", "crypto",
    "sha256", "md5", "flag", "httptest", "testing", "w", "r", "ctx", "err",
];

/// Whether an unqualified callee name is a keyword or builtin
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    KEYWORDS.contains(&name) || BUILTINS.contains(&name)
}

/// Whether a call qualifier names a standard-library package
#[must_use]
pub fn is_stdlib_qualifier(qualifier: &str) -> bool {
    STDLIB_QUALIFIERS.contains(&qualifier)
}

/// Whether a call site should be dropped
#[must_use]
pub fn is_denied(qualifier: Option<&str>, name: &str) -> bool {
    match qualifier {
        Some(q) => is_stdlib_qualifier(q),
        None => is_builtin(name),
    }
}
