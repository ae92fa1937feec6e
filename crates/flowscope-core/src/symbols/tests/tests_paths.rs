//! Tests for project path resolution

#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::scanner::WalkFilter;
use crate::symbols::resolve_path;

fn write(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create dir");
    }
    fs::write(path, "package x\n").expect("Failed to write file");
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write(temp_dir.path(), "internal/handlers/user.go");
    write(temp_dir.path(), "vendor/dep/only.go");
    temp_dir
}

#[test]
fn test_resolve_existing_absolute_path() {
    let temp_dir = project();
    let abs = temp_dir.path().join("internal/handlers/user.go");
    let abs = abs.display().to_string();

    assert_eq!(resolve_path(temp_dir.path(), &abs, &WalkFilter::default()), abs);
}

#[test]
fn test_resolve_project_relative_path() {
    let temp_dir = project();

    let resolved = resolve_path(
        temp_dir.path(),
        "internal/handlers/user.go",
        &WalkFilter::default(),
    );

    assert_eq!(
        resolved,
        temp_dir.path().join("internal/handlers/user.go").display().to_string()
    );
}

#[test]
fn test_resolve_by_file_name_search() {
    let temp_dir = project();
    let expected = temp_dir
        .path()
        .join("internal/handlers/user.go")
        .display()
        .to_string();

    assert_eq!(resolve_path(temp_dir.path(), "user.go", &WalkFilter::default()), expected);
    assert_eq!(
        resolve_path(temp_dir.path(), "./handlers/user.go", &WalkFilter::default()),
        expected
    );
}

#[test]
fn test_resolve_falls_back_to_input() {
    let temp_dir = project();

    assert_eq!(
        resolve_path(temp_dir.path(), "missing.go", &WalkFilter::default()),
        "missing.go"
    );
    // vendor is not searched
    assert_eq!(
        resolve_path(temp_dir.path(), "only.go", &WalkFilter::default()),
        "only.go"
    );
}
