//! Symbol lookup result types

use serde::{Deserialize, Serialize};

/// Kind of a resolved symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Method,
    Struct,
    Interface,
    TypeAlias,
    Constant,
    Variable,
    /// `name := ...` inside a function body
    ShortVar,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::TypeAlias => "type_alias",
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::ShortVar => "short_var",
        };
        write!(f, "{s}")
    }
}

/// A located symbol definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub kind: SymbolKind,
    /// Declaring file, relative to the project root
    pub file_path: String,
    /// Declaring file as found on disk
    pub absolute_path: String,
    /// 1-indexed line
    pub line: u32,
    /// Declaration text (whole body for functions and types)
    pub snippet: String,
}

/// One line containing a symbol name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolUsage {
    pub file_path: String,
    /// 1-indexed line
    pub line: u32,
    /// 1-indexed column of the first occurrence on the line
    pub column: u32,
    /// The matched line, trimmed
    pub text: String,
}

/// Flattened declaration record used for duplicate detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub file_path: String,
    pub line: u32,
}

/// Declarations sharing a kind and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub kind: SymbolKind,
    pub name: String,
    pub symbols: Vec<ProjectSymbol>,
}
