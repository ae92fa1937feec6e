//! Call graph model types

use serde::{Deserialize, Serialize};

use crate::structure::Parameter;

/// A function or method definition found by the call graph scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name (without receiver)
    pub name: String,
    /// Package clause of the declaring file
    pub package: String,
    /// Declaring file, relative to the project root
    pub file_path: String,
    /// Start line (1-indexed)
    pub line: u32,
    /// Line of the closing brace (1-indexed)
    pub end_line: u32,
    /// Receiver base type for methods
    pub receiver: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_types: Vec<String>,
}

impl FunctionDef {
    /// `pkg.name` lookup key
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    /// Whether `line` falls inside this definition
    #[must_use]
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.line && line <= self.end_line
    }
}

/// A call site, optionally resolved to a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    /// Enclosing function name
    pub caller: String,
    pub caller_file: String,
    /// Line of the call site (1-indexed)
    pub line: u32,
    /// Called name
    pub callee: String,
    /// Text before the dot in `x.callee(...)`
    pub qualifier: Option<String>,
    /// Package of the calling file
    pub package: String,
    /// Resolved definition file
    pub target_file: Option<String>,
    /// Resolved definition line
    pub target_line: Option<u32>,
}

impl CallEdge {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.target_file.is_some()
    }
}

/// Project-wide call graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraph {
    pub functions: Vec<FunctionDef>,
    pub calls: Vec<CallEdge>,
}

/// Summary counts for a call graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphStats {
    pub functions: usize,
    pub calls: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

impl CallGraph {
    /// Edges whose callee is `name`
    #[must_use]
    pub fn callers_of(&self, name: &str) -> Vec<&CallEdge> {
        self.calls.iter().filter(|c| c.callee == name).collect()
    }

    /// Edges made from inside `name`
    #[must_use]
    pub fn callees_of(&self, name: &str) -> Vec<&CallEdge> {
        self.calls.iter().filter(|c| c.caller == name).collect()
    }

    #[must_use]
    pub fn stats(&self) -> CallGraphStats {
        let resolved = self.calls.iter().filter(|c| c.is_resolved()).count();
        CallGraphStats {
            functions: self.functions.len(),
            calls: self.calls.len(),
            resolved,
            unresolved: self.calls.len() - resolved,
        }
    }
}
