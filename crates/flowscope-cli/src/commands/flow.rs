//! Route data-flow trace command

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use flowscope_core::{Analyzer, DataFlowGraph};
use tracing::info;

use super::output::{emit, header, truncate_path, truncate_str};
use crate::types::OutputFormat;

/// Print the data-flow graph of one route
///
/// # Errors
/// Returns an error if `root` is not a directory, the route ID is unknown,
/// or the result cannot be serialized.
pub fn run(analyzer: &Analyzer, root: &Path, route_id: &str, format: OutputFormat) -> Result<()> {
    info!("Tracing route {}", route_id);
    let graph = analyzer.trace_api_flow(root, route_id)?;
    emit(format, &graph, flow_text)
}

/// Nodes table followed by the edge list
#[must_use]
pub fn flow_text(graph: &DataFlowGraph) -> String {
    let mut out = header(&format!("{:<12} {:<30} LOCATION", "KIND", "NAME"), 90);
    for node in &graph.nodes {
        let location = match node.line {
            Some(line) => format!("{}:{line}", truncate_path(&node.file_path, 40)),
            None => node.file_path.clone(),
        };
        let _ = writeln!(
            out,
            "{:<12} {:<30} {}",
            node.kind().to_string(),
            truncate_str(&node.name, 30),
            location
        );
    }

    out.push_str("\nEDGES\n");
    let name = |id: &str| graph.node(id).map_or("?", |n| n.name.as_str()).to_string();
    for edge in &graph.edges {
        let _ = write!(out, "{} -> {}", name(&edge.source), name(&edge.target));
        if let Some(data_type) = edge.data_type {
            let _ = write!(out, " [{data_type}]");
        }
        if let Some(transformation) = edge.transformation {
            let _ = write!(out, " ({transformation})");
        }
        out.push('\n');
    }
    let _ = write!(out, "\n{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
    out
}
