//! Line-level text helpers

use std::path::Path;

/// Byte offset of a `//` comment that is not inside a string or rune literal
#[must_use]
pub fn find_line_comment(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if b == b'\\' && q != b'`' {
                    escaped = true;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => return Some(i),
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Blank out the content of string, rune and raw literals and drop any
/// trailing line comment, keeping byte offsets of the remaining code stable.
#[must_use]
pub fn mask_literals(line: &str) -> String {
    let code = match find_line_comment(line) {
        Some(idx) => &line[..idx],
        None => line,
    };

    let mut out = String::with_capacity(code.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in code.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                    push_blank(&mut out, c);
                } else if c == '\\' && q != '`' {
                    escaped = true;
                    push_blank(&mut out, c);
                } else if c == q {
                    quote = None;
                    out.push(c);
                } else {
                    push_blank(&mut out, c);
                }
            }
            None => {
                if matches!(c, '"' | '\'' | '`') {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    out
}

fn push_blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}

/// Consecutive `//` comment lines directly above `idx`, in source order
#[must_use]
pub fn leading_comments(lines: &[&str], idx: usize) -> Vec<String> {
    let mut comments = Vec::new();
    let mut i = idx;
    while i > 0 {
        i -= 1;
        let trimmed = lines[i].trim();
        match trimmed.strip_prefix("//") {
            Some(text) => comments.push(text.trim().to_string()),
            None => break,
        }
    }
    comments.reverse();
    comments
}

/// 1-based line number of a byte offset within `text`
#[must_use]
pub fn line_number_at(text: &str, offset: usize) -> u32 {
    let end = offset.min(text.len());
    let newlines = text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count();
    u32::try_from(newlines + 1).unwrap_or(u32::MAX)
}

/// Join up to `max_lines` lines starting at `start`
#[must_use]
pub fn join_snippet(lines: &[&str], start: usize, end: usize, max_lines: usize) -> String {
    if start >= lines.len() {
        return String::new();
    }
    let last = end.min(lines.len() - 1).min(start + max_lines.max(1) - 1);
    lines[start..=last].join("\n")
}

/// Path of `path` relative to `root`, using forward slashes
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
