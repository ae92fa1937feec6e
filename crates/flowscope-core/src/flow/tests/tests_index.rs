//! Tests for the project index used by the tracer

#![allow(clippy::expect_used)]

use std::fs;

use tempfile::TempDir;

use crate::flow::{FunctionRef, IndexedFile, ProjectIndex};
use crate::scanner::Scanner;
use crate::structure::{extract_structure, StructureExtractor};

fn indexed(rel_path: &str, content: &str) -> IndexedFile {
    IndexedFile {
        rel_path: rel_path.to_string(),
        content: content.to_string(),
        structure: extract_structure(content, rel_path),
    }
}

fn first<'a>(index: &'a ProjectIndex, name: &str, file: &str) -> FunctionRef<'a> {
    index
        .functions_named(name)
        .into_iter()
        .find(|f| f.file.rel_path == file)
        .expect("declaration")
}

#[test]
fn test_find_handler_prefers_route_file_then_package() {
    let index = ProjectIndex::from_files(vec![
        indexed("a/a.go", "package a\n\nfunc Run() {\n}\n"),
        indexed("b/b.go", "package b\n\nfunc Run() {\n}\n"),
    ]);

    let same_file = index.find_handler("Run", None, "b/b.go").expect("Run");
    assert_eq!(same_file.file.rel_path, "b/b.go");

    let by_package = index.find_handler("Run", Some("b"), "main.go").expect("Run");
    assert_eq!(by_package.file.rel_path, "b/b.go");

    let fallback = index.find_handler("Run", Some("zzz"), "main.go").expect("Run");
    assert_eq!(fallback.file.rel_path, "a/a.go");

    assert!(index.find_handler("Missing", None, "a/a.go").is_none());
}

#[test]
fn test_find_handler_prefers_http_signature() {
    let index = ProjectIndex::from_files(vec![
        indexed(
            "repository/user.go",
            "package repository\n\nfunc (s *UserStore) Create(ctx context.Context, u User) error {\n\treturn nil\n}\n",
        ),
        indexed(
            "web/user.go",
            "package web\n\nfunc (h *UserHandler) Create(w http.ResponseWriter, r *http.Request) {\n}\n",
        ),
    ]);

    let handler = index.find_handler("Create", Some("h"), "main.go").expect("Create");

    assert_eq!(handler.file.rel_path, "web/user.go");
}

#[test]
fn test_find_callee_skips_caller_with_same_name() {
    let index = ProjectIndex::from_files(vec![
        indexed(
            "handlers/user.go",
            "package handlers\n\nfunc (h *UserHandler) Save(w http.ResponseWriter, r *http.Request) {\n\th.svc.Save(r)\n}\n",
        ),
        indexed(
            "repository/user.go",
            "package repository\n\nfunc (repo *UserRepository) Save(u User) error {\n\treturn nil\n}\n",
        ),
        indexed(
            "service/user.go",
            "package service\n\nfunc (s *UserService) Save(r *http.Request) {\n\ts.repo.Save(u)\n}\n",
        ),
    ]);
    let handler = first(&index, "Save", "handlers/user.go");
    let service = first(&index, "Save", "service/user.go");

    let from_handler = index.find_callee("Save", Some("svc"), handler).expect("Save");
    assert_eq!(from_handler.file.rel_path, "service/user.go");

    let from_service = index.find_callee("Save", Some("repo"), service).expect("Save");
    assert_eq!(from_service.file.rel_path, "repository/user.go");

    let by_package = index.find_callee("Save", Some("repository"), handler).expect("Save");
    assert_eq!(by_package.file.rel_path, "repository/user.go");
}

#[test]
fn test_find_callee_own_receiver_and_unqualified() {
    let index = ProjectIndex::from_files(vec![
        indexed(
            "svc/a.go",
            "package svc\n\nfunc (s *Svc) Run() {\n\ts.check()\n\tcheck()\n}\n\nfunc (s *Svc) check() {\n}\n",
        ),
        indexed("svc/b.go", "package svc\n\nfunc check() {\n}\n"),
        indexed("other/c.go", "package other\n\nfunc (o *Other) check() {\n}\n"),
    ]);
    let run = first(&index, "Run", "svc/a.go");

    let method = index.find_callee("check", Some("s"), run).expect("check");
    assert_eq!(method.receiver_type(), Some("Svc"));

    let free = index.find_callee("check", None, run).expect("check");
    assert_eq!(free.file.rel_path, "svc/a.go");

    assert!(index.find_callee("missing", Some("s"), run).is_none());
}

#[test]
fn test_body_lines_multi_line_and_one_line() {
    let index = ProjectIndex::from_files(vec![indexed(
        "svc.go",
        "package svc\n\nfunc Long() {\n\tstep()\n}\n\nfunc Short() { step() }\n",
    )]);

    let long = first(&index, "Long", "svc.go");
    let lines: Vec<&str> = long.body_lines().into_iter().map(|(_, l)| l).collect();
    assert_eq!(lines, vec!["\tstep()", "}"]);

    let short = first(&index, "Short", "svc.go");
    assert_eq!(short.body_lines(), vec![(7, " step() }")]);
}

#[test]
fn test_serve_http_and_structs() {
    let index = ProjectIndex::from_files(vec![indexed(
        "api/users.go",
        "package api\n\ntype UserHandler struct {\n\tstore Store\n}\n\nfunc (h *UserHandler) ServeHTTP(w http.ResponseWriter, r *http.Request) {\n}\n",
    )]);

    let serve = index.serve_http_of("UserHandler").expect("ServeHTTP");
    assert_eq!(serve.decl.line, 7);
    assert!(index.serve_http_of("Other").is_none());

    let decl = index.struct_named("UserHandler").expect("struct");
    assert_eq!(decl.fields[0].name, "store");

    assert!(index.has_package("api"));
    assert!(!index.has_package("db"));
}

#[test]
fn test_build_reads_scanned_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("main.go"), "package main\n\nfunc main() {\n}\n")
        .expect("Failed to write file");

    let index = ProjectIndex::build(&Scanner::new(temp_dir.path()), &StructureExtractor::new());

    let file = index.file("main.go").expect("main.go");
    assert_eq!(file.structure.package, "main");
    assert_eq!(index.functions_named("main").len(), 1);
}
