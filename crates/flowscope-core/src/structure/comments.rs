//! Comment extraction and doc annotations

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{Annotation, Comment, CommentKind, DocComment};
use crate::pattern::compile;

static ANNOTATION: Lazy<Regex> = Lazy::new(|| compile(r"^@([A-Za-z][A-Za-z0-9_.-]*)\s*(.*)$"));

/// Build a doc comment from raw leading comment lines
#[must_use]
pub fn doc_comment(lines: Vec<String>) -> DocComment {
    let annotations = lines
        .iter()
        .filter_map(|line| {
            let caps = ANNOTATION.captures(line.trim())?;
            Some(Annotation {
                key: caps[1].to_string(),
                value: caps[2].trim().to_string(),
            })
        })
        .collect();
    DocComment { lines, annotations }
}

/// Extract every `//` and `/* */` comment in a file, in source order.
///
/// Runs independently of declaration parsing. Comment markers inside
/// interpreted, rune and raw string literals are ignored; raw strings may
/// span lines.
#[must_use]
pub fn extract_comments(lines: &[&str]) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut in_raw = false;
    let mut open_block: Option<(u32, String)> = None;

    for (idx, line) in lines.iter().enumerate() {
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let bytes = line.as_bytes();
        let mut i = 0;
        let mut quote: Option<u8> = None;
        let mut escaped = false;

        while i < bytes.len() {
            if let Some((start, text)) = open_block.as_mut() {
                match line[i..].find("*/") {
                    Some(rel) => {
                        text.push_str(&line[i..i + rel]);
                        comments.push(Comment {
                            kind: CommentKind::Block,
                            text: text.trim().to_string(),
                            line: *start,
                            end_line: line_no,
                        });
                        open_block = None;
                        i += rel + 2;
                        continue;
                    }
                    None => {
                        text.push_str(&line[i..]);
                        break;
                    }
                }
            }

            let b = bytes[i];
            if in_raw {
                if b == b'`' {
                    in_raw = false;
                }
                i += 1;
                continue;
            }
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            match b {
                b'`' => in_raw = true,
                b'"' | b'\'' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    comments.push(Comment {
                        kind: CommentKind::Line,
                        text: line[i + 2..].trim().to_string(),
                        line: line_no,
                        end_line: line_no,
                    });
                    break;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    open_block = Some((line_no, String::new()));
                    i += 2;
                    continue;
                }
                _ => {}
            }
            i += 1;
        }

        if let Some((_, text)) = open_block.as_mut() {
            text.push('\n');
        }
    }

    if let Some((start, text)) = open_block {
        comments.push(Comment {
            kind: CommentKind::Block,
            text: text.trim().to_string(),
            line: start,
            end_line: u32::try_from(lines.len()).unwrap_or(u32::MAX),
        });
    }

    comments
}
