//! Route discovery command

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use flowscope_core::{Analyzer, ApiRoute};
use tracing::info;

use super::output::{emit, header, truncate_path, truncate_str};
use crate::types::OutputFormat;

/// Print discovered routes
///
/// # Errors
/// Returns an error if `root` is not a directory or the result cannot be
/// serialized.
pub fn run(analyzer: &Analyzer, root: &Path, format: OutputFormat) -> Result<()> {
    info!("Discovering routes in {}", root.display());
    let routes = analyzer.discover_routes(root)?;
    emit(format, &routes, |r| route_table(r))
}

#[must_use]
pub fn route_table(routes: &[ApiRoute]) -> String {
    if routes.is_empty() {
        return "No routes found".to_string();
    }
    let mut out = header(
        &format!("{:<8} {:<30} {:<25} {:<35} ID", "METHOD", "PATH", "HANDLER", "LOCATION"),
        140,
    );
    for r in routes {
        let location = format!("{}:{}", truncate_path(&r.file_path, 30), r.line);
        let _ = writeln!(
            out,
            "{:<8} {:<30} {:<25} {:<35} {}",
            r.method,
            truncate_str(&r.path, 30),
            truncate_str(&r.handler, 25),
            location,
            r.id
        );
    }
    let _ = write!(out, "\nFound {} routes", routes.len());
    out
}
