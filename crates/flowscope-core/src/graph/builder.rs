//! Project-wide call graph construction

use tracing::{debug, warn};

use super::calls::{extract_function_calls, extract_functions, package_name};
use super::model::CallGraph;
use super::resolve::resolve_call_targets;
use crate::scanner::Scanner;

/// Scan every source file under the scanner's root, collect definitions
/// and call sites, then resolve call targets in a second pass.
///
/// Unreadable files are logged and skipped.
#[must_use]
pub fn build_call_graph(scanner: &Scanner) -> CallGraph {
    let mut graph = CallGraph::default();

    for file in scanner.scan() {
        let content = match file.read() {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", file.rel_path, e);
                continue;
            }
        };
        let package = package_name(&content);
        let functions = extract_functions(&content, &file.rel_path, &package);
        let calls = extract_function_calls(&content, &file.rel_path, &package);
        debug!(
            "{}: {} functions, {} calls",
            file.rel_path,
            functions.len(),
            calls.len()
        );
        graph.functions.extend(functions);
        graph.calls.extend(calls);
    }

    resolve_call_targets(&mut graph);
    graph
}
