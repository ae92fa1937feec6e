//! Tests for project-wide route discovery

#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::routes::{dedup_routes, discover_project_routes, discover_routes_in_text};
use crate::scanner::Scanner;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create dir");
    }
    fs::write(path, content).expect("Failed to write file");
}

#[test]
fn test_same_endpoint_registered_twice_collapses() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write(
        root,
        "a_router.go",
        "package api\n\nfunc A() {\n\tr.HandleFunc(\"/users\", ListUsers).Methods(\"GET\")\n}\n",
    );
    write(
        root,
        "b_router.go",
        "package api\n\nfunc B() {\n\trouter.GET(\"/users/\", h.List)\n\trouter.POST(\"/users\", h.Create)\n}\n",
    );
    write(
        root,
        "vendor/gin/gin.go",
        "package gin\n\nfunc C() {\n\tr.GET(\"/vendored\", x)\n}\n",
    );

    let routes = discover_project_routes(&Scanner::new(root));

    let found: Vec<(&str, &str, &str)> = routes
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str(), r.file_path.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("GET", "/users", "a_router.go"),
            ("POST", "/users", "b_router.go"),
        ]
    );
    assert_eq!(routes[0].handler, "ListUsers");
}

#[test]
fn test_dedup_routes_is_idempotent() {
    let src = "r.Get(\"/a\", h.A)\nr.Get(\"/a\", h.B)\nr.Post(\"/a\", h.C)\n";
    let routes = discover_routes_in_text(src, "a.go");
    assert_eq!(routes.len(), 3);

    let once = dedup_routes(routes);
    let twice = dedup_routes(once.clone());

    assert_eq!(once.len(), 2);
    assert_eq!(once, twice);
    assert_eq!(once[0].handler, "h.A");
}
