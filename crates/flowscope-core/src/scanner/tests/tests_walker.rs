//! Tests for file walker

#![allow(clippy::expect_used)]

use crate::scanner::{DiscoveredFile, Scanner, WalkFilter};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(root: &std::path::Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

fn rel_paths(scanner: &Scanner) -> Vec<String> {
    scanner.scan().map(|f| f.rel_path).collect()
}

#[test]
fn test_scanner_finds_go_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "main.go", "package main");
    write(temp_dir.path(), "internal/user.go", "package internal");
    write(temp_dir.path(), "README.md", "# Hello");

    let files = rel_paths(&Scanner::new(temp_dir.path()));

    assert_eq!(files, vec!["internal/user.go", "main.go"]);
}

#[test]
fn test_scanner_skips_vendor_node_modules_and_dot_dirs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "app.go", "package app");
    write(temp_dir.path(), "vendor/lib/lib.go", "package lib");
    write(temp_dir.path(), "node_modules/x/x.go", "package x");
    write(temp_dir.path(), ".git/hooks/hook.go", "package hooks");
    write(temp_dir.path(), ".cache/gen.go", "package gen");

    let files = rel_paths(&Scanner::new(temp_dir.path()));

    assert_eq!(files, vec!["app.go"]);
}

#[test]
fn test_scanner_excludes_test_files_by_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "user.go", "package user");
    write(temp_dir.path(), "user_test.go", "package user");

    let files = rel_paths(&Scanner::new(temp_dir.path()));
    assert_eq!(files, vec!["user.go"]);

    let with_tests = Scanner::new(temp_dir.path()).with_filter(WalkFilter::default().with_tests(true));
    assert_eq!(rel_paths(&with_tests), vec!["user.go", "user_test.go"]);
}

#[test]
fn test_scanner_with_custom_skip_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "cmd/main.go", "package main");
    write(temp_dir.path(), "gen/models.go", "package gen");

    let scanner =
        Scanner::new(temp_dir.path()).with_filter(WalkFilter::default().with_skip_dir("gen"));

    assert_eq!(rel_paths(&scanner), vec!["cmd/main.go"]);
}

#[test]
fn test_scanner_order_is_stable() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for name in ["zeta.go", "alpha.go", "mid/beta.go"] {
        write(temp_dir.path(), name, "package p");
    }

    let first = rel_paths(&Scanner::new(temp_dir.path()));
    let second = rel_paths(&Scanner::new(temp_dir.path()));

    assert_eq!(first, second);
    assert_eq!(first, vec!["alpha.go", "mid/beta.go", "zeta.go"]);
}

#[test]
fn test_scanner_missing_root_yields_nothing() {
    let scanner = Scanner::new("/nonexistent/path/for/flowscope");
    assert_eq!(scanner.scan().count(), 0);
}

#[test]
fn test_discovered_file_read() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "pkg/a.go", "package pkg\n");

    let file = DiscoveredFile::new(temp_dir.path(), temp_dir.path().join("pkg/a.go"));

    assert_eq!(file.rel_path, "pkg/a.go");
    assert_eq!(file.read().expect("Failed to read"), "package pkg\n");
}

#[test]
fn test_discovered_file_read_nonexistent_file() {
    let file = DiscoveredFile {
        path: PathBuf::from("/nonexistent/path/to/file.go"),
        rel_path: "file.go".to_string(),
    };

    let err = file.read().expect_err("read should fail");
    assert!(err.to_string().contains("/nonexistent/path/to/file.go"));
}
