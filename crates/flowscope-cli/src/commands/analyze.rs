//! Declaration commands: one file or a whole project

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use flowscope_core::structure::{ProjectStructure, StructureCounts};
use flowscope_core::{Analyzer, CodeStructure};
use tracing::info;

use super::output::{emit, header, truncate_path, truncate_str};
use crate::types::OutputFormat;

/// Print the declarations of one file
///
/// # Errors
/// Returns an error if the result cannot be serialized.
pub fn run_file(analyzer: &Analyzer, path: &Path, format: OutputFormat) -> Result<()> {
    info!("Analyzing file: {}", path.display());
    let structure = analyzer.analyze_file(path);
    emit(format, &structure, structure_table)
}

/// Print per-file declaration counts and totals for a project
///
/// # Errors
/// Returns an error if `root` is not a directory or the result cannot be
/// serialized.
pub fn run_project(analyzer: &Analyzer, root: &Path, format: OutputFormat) -> Result<()> {
    info!("Analyzing project: {}", root.display());
    let project = analyzer.analyze_project(root)?;
    emit(format, &project, project_table)
}

/// One row per declaration: name, kind, line
#[must_use]
pub fn structure_table(s: &CodeStructure) -> String {
    let mut rows: Vec<(String, &str, u32)> = Vec::new();
    rows.extend(s.functions.iter().map(|f| {
        let name = match &f.receiver {
            Some(r) => format!("{}.{}", r.type_name, f.name),
            None => f.name.clone(),
        };
        let kind = if f.receiver.is_some() { "method" } else { "function" };
        (name, kind, f.line)
    }));
    rows.extend(s.structs.iter().map(|d| (d.name.clone(), "struct", d.line)));
    rows.extend(s.interfaces.iter().map(|d| (d.name.clone(), "interface", d.line)));
    rows.extend(s.types.iter().map(|d| (d.name.clone(), "type", d.line)));
    rows.extend(s.constants.iter().map(|d| (d.name.clone(), "const", d.line)));
    rows.extend(s.variables.iter().map(|d| (d.name.clone(), "var", d.line)));
    rows.sort_by_key(|(_, _, line)| *line);

    let mut out = format!("package {} ({})\n", s.package, s.file_path);
    out.push_str(&header(&format!("{:<40} {:<12} LINE", "NAME", "KIND"), 60));
    for (name, kind, line) in &rows {
        let _ = writeln!(out, "{:<40} {:<12} {}", truncate_str(name, 40), kind, line);
    }
    let _ = write!(
        out,
        "\n{} imports, {} declarations, {} comments",
        s.imports.len(),
        rows.len(),
        s.comments.len()
    );
    out
}

fn counts_row(label: &str, c: &StructureCounts) -> String {
    format!(
        "{:<50} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
        truncate_path(label, 50),
        c.imports,
        c.types,
        c.structs,
        c.interfaces,
        c.functions,
        c.constants + c.variables
    )
}

/// One row of counts per file, then the project totals
#[must_use]
pub fn project_table(project: &ProjectStructure) -> String {
    let mut out = header(
        &format!(
            "{:<50} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            "FILE", "IMP", "TYPE", "STRCT", "IFACE", "FUNC", "VALUE"
        ),
        86,
    );
    for file in &project.files {
        let mut c = StructureCounts::default();
        c.add(file);
        out.push_str(&counts_row(&file.file_path, &c));
        out.push('\n');
    }
    out.push_str(&"-".repeat(86));
    out.push('\n');
    out.push_str(&counts_row(&format!("{} files", project.counts.files), &project.counts));
    out
}
