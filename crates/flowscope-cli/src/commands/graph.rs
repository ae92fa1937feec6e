//! Call graph command

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use flowscope_core::{Analyzer, CallGraph};
use tracing::info;

use super::output::{emit, header, truncate_path, truncate_str};
use crate::types::OutputFormat;

/// Print every call edge with its resolved target
///
/// # Errors
/// Returns an error if `root` is not a directory or the result cannot be
/// serialized.
pub fn run(analyzer: &Analyzer, root: &Path, format: OutputFormat) -> Result<()> {
    info!("Building call graph for {}", root.display());
    let graph = analyzer.analyze_call_graph(root)?;
    emit(format, &graph, call_table)
}

#[must_use]
pub fn call_table(graph: &CallGraph) -> String {
    let mut out = header(&format!("{:<30} {:<30} TARGET", "CALLER", "CALLEE"), 110);
    for call in &graph.calls {
        let callee = match &call.qualifier {
            Some(q) => format!("{q}.{}", call.callee),
            None => call.callee.clone(),
        };
        let target = match (&call.target_file, call.target_line) {
            (Some(file), Some(line)) => format!("{}:{line}", truncate_path(file, 45)),
            _ => "(unresolved)".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<30} {:<30} {}",
            truncate_str(&call.caller, 30),
            truncate_str(&callee, 30),
            target
        );
    }
    let stats = graph.stats();
    let _ = write!(
        out,
        "\n{} functions, {} calls ({} resolved, {} unresolved)",
        stats.functions, stats.calls, stats.resolved, stats.unresolved
    );
    out
}
