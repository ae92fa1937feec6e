//! Tests for running commands against a project on disk

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use flowscope_cli::commands::{analyze, flow, graph, routes, symbols};
use flowscope_cli::OutputFormat;
use flowscope_core::{Analyzer, AnalyzerConfig};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "go.mod", "module example.com/app\n");
    write(
        root,
        "main.go",
        "package main\n\nfunc main() {\n\tr := gin.Default()\n\tr.GET(\"/ping\", ping)\n}\n\nfunc ping(c *gin.Context) {\n\tc.JSON(200, status())\n}\n\nfunc status() string {\n\treturn \"ok\"\n}\n",
    );
    temp_dir
}

#[test]
fn test_commands_succeed_in_both_formats() {
    let temp_dir = project();
    let root = temp_dir.path();
    let analyzer = Analyzer::new(AnalyzerConfig::default());

    for format in [OutputFormat::Text, OutputFormat::Json] {
        analyze::run_file(&analyzer, &root.join("main.go"), format).unwrap();
        analyze::run_project(&analyzer, root, format).unwrap();
        symbols::run_duplicates(&analyzer, root, format).unwrap();
        symbols::run_definition(&analyzer, &root.join("main.go"), 5, 18, format).unwrap();
        symbols::run_symbol(&analyzer, root, "status", format).unwrap();
        symbols::run_usages(&analyzer, root, "ping", format).unwrap();
        symbols::run_resolve(&analyzer, root, "main.go", format).unwrap();
        graph::run(&analyzer, root, format).unwrap();
        routes::run(&analyzer, root, format).unwrap();
    }
}

#[test]
fn test_trace_command_uses_discovered_id() {
    let temp_dir = project();
    let root = temp_dir.path();
    let analyzer = Analyzer::default();
    let routes = analyzer.discover_routes(root).unwrap();
    assert_eq!(routes.len(), 1);

    flow::run(&analyzer, root, &routes[0].id, OutputFormat::Text).unwrap();
    assert!(flow::run(&analyzer, root, "missing", OutputFormat::Text).is_err());
}

#[test]
fn test_project_commands_reject_files() {
    let temp_dir = project();
    let file = temp_dir.path().join("main.go");
    let analyzer = Analyzer::default();

    assert!(analyze::run_project(&analyzer, &file, OutputFormat::Text).is_err());
    assert!(routes::run(&analyzer, &file, OutputFormat::Json).is_err());
}

#[test]
fn test_project_table_totals() {
    let temp_dir = project();
    let project = Analyzer::default().analyze_project(temp_dir.path()).unwrap();

    let table = analyze::project_table(&project);

    assert!(table.contains("main.go"));
    assert!(table.contains("1 files"));
}
