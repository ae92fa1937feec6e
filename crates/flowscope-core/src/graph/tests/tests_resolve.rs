//! Tests for call target resolution

use crate::graph::model::{CallEdge, CallGraph, FunctionDef};
use crate::graph::{resolve_call_targets, TargetIndex};

fn func(name: &str, package: &str, file: &str, line: u32) -> FunctionDef {
    FunctionDef {
        name: name.to_string(),
        package: package.to_string(),
        file_path: file.to_string(),
        line,
        end_line: line + 2,
        receiver: None,
        parameters: Vec::new(),
        return_types: Vec::new(),
    }
}

fn call(package: &str, qualifier: Option<&str>, callee: &str) -> CallEdge {
    CallEdge {
        caller: "main".to_string(),
        caller_file: "main.go".to_string(),
        line: 3,
        callee: callee.to_string(),
        qualifier: qualifier.map(str::to_string),
        package: package.to_string(),
        target_file: None,
        target_line: None,
    }
}

fn graph() -> CallGraph {
    CallGraph {
        functions: vec![
            func("Run", "alpha", "alpha/run.go", 5),
            func("Run", "beta", "beta/run.go", 9),
            func("Create", "store", "store/store.go", 12),
        ],
        calls: Vec::new(),
    }
}

#[test]
fn test_package_qualified_lookup_wins() {
    let index = TargetIndex::build(&graph());

    let target = index.lookup(Some("alpha"), "main", "Run");
    assert_eq!(target, Some(&("alpha/run.go".to_string(), 5)));

    let target = index.lookup(None, "beta", "Run");
    assert_eq!(target, Some(&("beta/run.go".to_string(), 9)));
}

#[test]
fn test_bare_name_fallback_takes_last_inserted() {
    let index = TargetIndex::build(&graph());

    // `svc` is a variable, not a package
    let target = index.lookup(Some("svc"), "main", "Create");
    assert_eq!(target, Some(&("store/store.go".to_string(), 12)));

    let target = index.lookup(None, "main", "Run");
    assert_eq!(target, Some(&("beta/run.go".to_string(), 9)));
}

#[test]
fn test_resolve_patches_edges_and_keeps_unresolved() {
    let mut g = graph();
    g.calls = vec![call("main", Some("alpha"), "Run"), call("main", None, "Missing")];

    resolve_call_targets(&mut g);

    assert_eq!(g.calls.len(), 2);
    assert_eq!(g.calls[0].target_file.as_deref(), Some("alpha/run.go"));
    assert_eq!(g.calls[0].target_line, Some(5));
    assert!(!g.calls[1].is_resolved());
    assert_eq!(g.calls[1].target_line, None);
}
