//! Tests for project-wide call graph construction

#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::graph::build_call_graph;
use crate::scanner::Scanner;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write(root, "go.mod", "module example.com/app\n");
    write(
        root,
        "main.go",
        "package main\n\nfunc main() {\n\tsrv := service.New()\n\tsrv.Start()\n\tfmt.Println(\"up\")\n}\n",
    );
    write(
        root,
        "service/service.go",
        "package service\n\nfunc New() *Server {\n\treturn &Server{}\n}\n\nfunc (s *Server) Start() {\n\tlisten()\n}\n",
    );
    write(root, "vendor/dep/dep.go", "package dep\n\nfunc Start() {}\n");
    write(root, "main_test.go", "package main\n\nfunc TestMain() {}\n");
    temp_dir
}

#[test]
fn test_build_call_graph_resolves_across_packages() {
    let temp_dir = project();

    let graph = build_call_graph(&Scanner::new(temp_dir.path()));

    let names: Vec<&str> = graph.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["main", "New", "Start"]);

    let new_call = graph
        .calls
        .iter()
        .find(|c| c.callee == "New")
        .expect("call to New");
    assert_eq!(new_call.caller, "main");
    assert_eq!(new_call.target_file.as_deref(), Some("service/service.go"));
    assert_eq!(new_call.target_line, Some(3));

    let start_call = graph
        .calls
        .iter()
        .find(|c| c.callee == "Start")
        .expect("call to Start");
    assert_eq!(start_call.target_line, Some(7));

    let stats = graph.stats();
    assert_eq!(stats.calls, 3);
    assert_eq!(stats.resolved, 2);
    assert_eq!(stats.unresolved, 1);
}

#[test]
fn test_build_call_graph_empty_project() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let graph = build_call_graph(&Scanner::new(temp_dir.path()));

    assert!(graph.functions.is_empty());
    assert!(graph.calls.is_empty());
}
