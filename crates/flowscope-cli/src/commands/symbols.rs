//! Symbol commands: definitions, usages, duplicates and path resolution

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use flowscope_core::symbols::DuplicateGroup;
use flowscope_core::{Analyzer, SymbolInfo, SymbolUsage};
use tracing::info;

use super::output::{emit, header, truncate_path, truncate_str};
use crate::types::OutputFormat;

/// Print duplicate declaration groups
///
/// # Errors
/// Returns an error if `root` is not a directory or the result cannot be
/// serialized.
pub fn run_duplicates(analyzer: &Analyzer, root: &Path, format: OutputFormat) -> Result<()> {
    info!("Finding duplicate symbols in {}", root.display());
    let groups = analyzer.find_duplicate_symbols(root)?;
    emit(format, &groups, |g| duplicates_table(g))
}

/// Print the definition of the identifier at a position
///
/// # Errors
/// Returns an error if `file` cannot be read or the result cannot be
/// serialized.
pub fn run_definition(
    analyzer: &Analyzer,
    file: &Path,
    line: u32,
    column: u32,
    format: OutputFormat,
) -> Result<()> {
    info!("Resolving {}:{}:{}", file.display(), line, column);
    let info = analyzer.get_definition(file, line, column)?;
    emit(format, &info, symbol_text)
}

/// Print where a symbol is declared
///
/// # Errors
/// Returns an error if `root` is not a directory or the result cannot be
/// serialized.
pub fn run_symbol(analyzer: &Analyzer, root: &Path, name: &str, format: OutputFormat) -> Result<()> {
    info!("Looking up symbol '{}'...", name);
    let info = analyzer.get_symbol_info(root, name)?;
    emit(format, &info, symbol_text)
}

/// Print every line mentioning a symbol
///
/// # Errors
/// Returns an error if `root` is not a directory or the result cannot be
/// serialized.
pub fn run_usages(analyzer: &Analyzer, root: &Path, name: &str, format: OutputFormat) -> Result<()> {
    info!("Finding usages of '{}'...", name);
    let usages = analyzer.find_symbol_usages(root, name)?;
    emit(format, &usages, |u| usages_table(u))
}

/// Print a path resolved against the project root
///
/// # Errors
/// Returns an error if the result cannot be serialized.
pub fn run_resolve(analyzer: &Analyzer, root: &Path, path: &str, format: OutputFormat) -> Result<()> {
    let resolved = analyzer.resolve_path(root, path);
    emit(format, &resolved, String::clone)
}

#[must_use]
pub fn symbol_text(info: &Option<SymbolInfo>) -> String {
    match info {
        Some(s) => format!(
            "{} {} at {}:{}\n\n{}",
            s.kind, s.name, s.file_path, s.line, s.snippet
        ),
        None => "No definition found".to_string(),
    }
}

#[must_use]
pub fn usages_table(usages: &[SymbolUsage]) -> String {
    if usages.is_empty() {
        return "No usages found".to_string();
    }
    let mut out = header(&format!("{:<50} {:<10} TEXT", "FILE", "LINE:COL"), 110);
    for u in usages {
        let position = format!("{}:{}", u.line, u.column);
        let _ = writeln!(
            out,
            "{:<50} {:<10} {}",
            truncate_path(&u.file_path, 50),
            position,
            truncate_str(&u.text, 60)
        );
    }
    let _ = write!(out, "\nFound {} usages", usages.len());
    out
}

#[must_use]
pub fn duplicates_table(groups: &[DuplicateGroup]) -> String {
    if groups.is_empty() {
        return "No duplicate symbols".to_string();
    }
    let mut out = header(&format!("{:<12} {:<30} LOCATION", "KIND", "NAME"), 100);
    for g in groups {
        for s in &g.symbols {
            let _ = writeln!(
                out,
                "{:<12} {:<30} {}:{}",
                g.kind.to_string(),
                truncate_str(&g.name, 30),
                truncate_path(&s.file_path, 50),
                s.line
            );
        }
    }
    let _ = write!(out, "\nFound {} duplicate groups", groups.len());
    out
}
