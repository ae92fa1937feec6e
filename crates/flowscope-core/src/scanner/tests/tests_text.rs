//! Tests for line-level text helpers

use crate::scanner::{
    find_line_comment, join_snippet, leading_comments, line_number_at, mask_literals,
    relative_path,
};
use std::path::Path;

#[test]
fn test_find_line_comment_outside_strings() {
    assert_eq!(find_line_comment("x := 1 // note"), Some(7));
    assert_eq!(find_line_comment("url := \"http://example.com\""), None);
    assert_eq!(find_line_comment("s := `//raw` // c"), Some(13));
    assert_eq!(find_line_comment("no comment"), None);
}

#[test]
fn test_mask_literals_blanks_strings_and_drops_comment() {
    let masked = mask_literals("call(\"f(x)\", y) // other()");
    assert_eq!(masked, "call(\"    \", y) ");
    assert!(!masked.contains("other"));
}

#[test]
fn test_mask_literals_keeps_offsets() {
    let line = "a := fmt.Sprintf(\"%d\", n)";
    let masked = mask_literals(line);
    assert_eq!(masked.len(), line.len());
    assert_eq!(masked.find("Sprintf"), line.find("Sprintf"));
}

#[test]
fn test_leading_comments() {
    let lines = vec![
        "package main",
        "",
        "// Handler serves users",
        "// @endpoint /users",
        "func Handler() {}",
    ];

    assert_eq!(
        leading_comments(&lines, 4),
        vec!["Handler serves users", "@endpoint /users"]
    );
    assert!(leading_comments(&lines, 0).is_empty());
    assert!(leading_comments(&lines, 2).is_empty());
}

#[test]
fn test_line_number_at() {
    let text = "a\nb\nc";
    assert_eq!(line_number_at(text, 0), 1);
    assert_eq!(line_number_at(text, 2), 2);
    assert_eq!(line_number_at(text, 4), 3);
    assert_eq!(line_number_at(text, 100), 3);
}

#[test]
fn test_join_snippet_caps_lines() {
    let lines = vec!["a", "b", "c", "d"];
    assert_eq!(join_snippet(&lines, 0, 3, 2), "a\nb");
    assert_eq!(join_snippet(&lines, 2, 10, 10), "c\nd");
    assert_eq!(join_snippet(&lines, 9, 10, 10), "");
}

#[test]
fn test_relative_path() {
    assert_eq!(
        relative_path(Path::new("/repo"), Path::new("/repo/internal/user.go")),
        "internal/user.go"
    );
    assert_eq!(
        relative_path(Path::new("/other"), Path::new("/repo/a.go")),
        "/repo/a.go"
    );
}
