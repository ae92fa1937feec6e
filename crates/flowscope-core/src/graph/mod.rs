//! Graph module: Function call graph
//!
//! Extracts function definitions and call sites per file, then resolves
//! each call site against the project-wide definition set.

mod builder;
pub mod builtins;
pub mod calls;
pub mod model;
mod resolve;

pub use builder::build_call_graph;
pub use calls::{extract_function_calls, extract_functions, package_name, scan_calls, CallSite};
pub use model::{CallEdge, CallGraph, CallGraphStats, FunctionDef};
pub use resolve::{resolve_call_targets, TargetIndex};

#[cfg(test)]
mod tests;
