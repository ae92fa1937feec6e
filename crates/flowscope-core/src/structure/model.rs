//! Declaration model for one analyzed file

use serde::{Deserialize, Serialize};

/// Placeholder type for a parameter whose type could not be recovered
pub const UNKNOWN_TYPE: &str = "unknown";

/// A `// @key value` annotation in a doc comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}

/// Comment lines directly above a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Comment text without the `//` marker
    pub lines: Vec<String>,
    /// Annotations parsed out of `lines`
    pub annotations: Vec<Annotation>,
}

impl DocComment {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First annotation value for `key`
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

/// An import spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    /// Alias, `_` or `.` when present
    pub alias: Option<String>,
    pub line: u32,
}

/// A named parameter or result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

/// Method receiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub name: Option<String>,
    /// Base type name without `*`
    pub type_name: String,
    pub pointer: bool,
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    /// Generic type parameter list, verbatim
    pub type_params: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_types: Vec<String>,
    /// 1-based start line
    pub line: u32,
    /// 1-based line of the closing brace
    pub end_line: u32,
    pub snippet: String,
    pub doc: DocComment,
}

/// A struct field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub type_name: String,
    pub tag: Option<String>,
    pub comment: Option<String>,
    /// Embedded field (no explicit name)
    pub embedded: bool,
}

/// A struct type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: String,
    pub type_params: Option<String>,
    pub fields: Vec<StructField>,
    pub line: u32,
    pub snippet: String,
    pub doc: DocComment,
}

/// A method signature inside an interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_types: Vec<String>,
    pub line: u32,
}

/// An interface type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Option<String>,
    pub methods: Vec<InterfaceMethod>,
    /// Embedded interfaces and type-set terms
    pub embeds: Vec<String>,
    pub line: u32,
    pub snippet: String,
    pub doc: DocComment,
}

/// A named non-struct, non-interface type (`type ID string`, `type A = B`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub type_params: Option<String>,
    pub underlying: String,
    /// `type A = B` rather than a defined type
    pub alias: bool,
    pub line: u32,
    pub snippet: String,
    pub doc: DocComment,
}

/// A constant or variable spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueDecl {
    pub name: String,
    pub type_name: Option<String>,
    pub value: Option<String>,
    pub line: u32,
    pub snippet: String,
    pub doc: DocComment,
}

/// Kind of source comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Line,
    Block,
}

/// A comment anywhere in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub line: u32,
    pub end_line: u32,
}

/// All declarations recovered from one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStructure {
    /// Path as requested (relative to the project root in project scans)
    pub file_path: String,
    pub package: String,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
    pub structs: Vec<StructDecl>,
    pub interfaces: Vec<InterfaceDecl>,
    pub constants: Vec<ValueDecl>,
    pub variables: Vec<ValueDecl>,
    pub functions: Vec<FunctionDecl>,
    pub comments: Vec<Comment>,
}

impl CodeStructure {
    /// An empty structure for a file that could not be analyzed
    #[must_use]
    pub fn empty(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Find a function or method by name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find a struct by name
    #[must_use]
    pub fn struct_decl(&self, name: &str) -> Option<&StructDecl> {
        self.structs.iter().find(|s| s.name == name)
    }
}

/// Aggregate element counts over a project scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureCounts {
    pub files: usize,
    pub imports: usize,
    pub types: usize,
    pub constants: usize,
    pub variables: usize,
    pub functions: usize,
    pub structs: usize,
    pub interfaces: usize,
}

impl StructureCounts {
    /// Add one file's declarations to the totals
    pub fn add(&mut self, structure: &CodeStructure) {
        self.files += 1;
        self.imports += structure.imports.len();
        self.types += structure.types.len();
        self.constants += structure.constants.len();
        self.variables += structure.variables.len();
        self.functions += structure.functions.len();
        self.structs += structure.structs.len();
        self.interfaces += structure.interfaces.len();
    }
}

/// Result of analyzing every file of a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStructure {
    pub files: Vec<CodeStructure>,
    pub counts: StructureCounts,
}
