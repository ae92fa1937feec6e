//! flowscope-core: Heuristic structural analysis of Go source trees
//!
//! This library recovers declarations, call relationships, HTTP routes and
//! request data flow from Go projects by scanning source text with regular
//! expressions and brace matching. No compiler front end is involved, so
//! every result is best-effort.
//!
//! # Components
//!
//! - **scanner** - file discovery and brace/paren block extraction
//! - **structure** - per-file declaration extraction
//! - **symbols** - definition lookup, usages and duplicate detection
//! - **graph** - function call graph construction and resolution
//! - **routes** - HTTP route discovery
//! - **flow** - request data-flow tracing from a route
//!
//! Every operation re-reads source from disk; nothing is cached between calls.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod flow;
pub mod graph;
pub mod ipc;
pub mod routes;
pub mod scanner;
pub mod structure;
pub mod symbols;

mod pattern;

// Re-export commonly used types
pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use flow::{DataFlowEdge, DataFlowGraph, DataFlowNode, FlowNodeKind};
pub use graph::model::{CallEdge, CallGraph, FunctionDef};
pub use routes::ApiRoute;
pub use scanner::{DiscoveredFile, Scanner, WalkFilter};
pub use structure::model::CodeStructure;
pub use symbols::{SymbolInfo, SymbolKind, SymbolUsage};
