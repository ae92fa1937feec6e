//! Function definition and call-site extraction

use once_cell::sync::Lazy;
use regex::Regex;

use super::builtins::{is_denied, is_stdlib_qualifier};
use super::model::{CallEdge, FunctionDef};
use crate::pattern::compile;
use crate::scanner::{extract_block, mask_literals, Delimiter};
use crate::structure::signature::{is_func_header, parse_signature};

static CALL: Lazy<Regex> =
    Lazy::new(|| compile(r"\b([A-Za-z_][A-Za-z0-9_]*)(?:\.([A-Za-z_][A-Za-z0-9_]*))?\s*\("));

static PACKAGE: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^\s*package\s+([A-Za-z_][A-Za-z0-9_]*)"));

/// One call-shaped expression on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub qualifier: Option<String>,
    pub name: String,
    /// Byte offset of the match in the line
    pub column: usize,
}

/// Package clause of a file, empty when missing
#[must_use]
pub fn package_name(content: &str) -> String {
    PACKAGE
        .captures(content)
        .map(|c| c[1].to_string())
        .unwrap_or_default()
}

/// Call sites on one line that survive the deny-list.
///
/// String and rune contents and trailing comments are masked first. A bare
/// name directly after a `.` is a call on a previous call's result and is
/// skipped.
#[must_use]
pub fn scan_calls(line: &str) -> Vec<CallSite> {
    let masked = mask_literals(line);
    let mut sites = Vec::new();

    for caps in CALL.captures_iter(&masked) {
        let Some(whole) = caps.get(0) else { continue };
        let (qualifier, name) = match caps.get(2) {
            Some(method) => (Some(caps[1].to_string()), method.as_str().to_string()),
            None => (None, caps[1].to_string()),
        };

        let start = whole.start();
        let chained = start > 0 && masked.as_bytes()[start - 1] == b'.';
        if chained && qualifier.is_none() {
            continue;
        }
        if is_denied(qualifier.as_deref(), &name) {
            continue;
        }
        // `r.URL.Query()` is judged by its root `r`
        if chained && chain_root(&masked[..start - 1]).is_some_and(is_stdlib_qualifier) {
            continue;
        }

        sites.push(CallSite {
            qualifier,
            name,
            column: start,
        });
    }
    sites
}

/// First identifier of the selector chain ending at the end of `before`
fn chain_root(before: &str) -> Option<&str> {
    let start = before
        .rfind(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
        .map_or(0, |idx| idx + 1);
    before[start..].split('.').next().filter(|root| !root.is_empty())
}

/// Every top-level function and method declared in `content`, in order
#[must_use]
pub fn extract_functions(content: &str, file_path: &str, package: &str) -> Vec<FunctionDef> {
    let lines: Vec<&str> = content.lines().collect();
    let mut functions = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_func_header(lines[i].trim()) {
            i += 1;
            continue;
        }
        let block = extract_block(&lines, i, Delimiter::Brace);
        if let Some(sig) = parse_signature(&block.text(&lines)) {
            functions.push(FunctionDef {
                name: sig.name,
                package: package.to_string(),
                file_path: file_path.to_string(),
                line: line_no(i),
                end_line: line_no(block.end),
                receiver: sig.receiver.map(|r| r.type_name),
                parameters: sig.parameters,
                return_types: sig.return_types,
            });
        }
        i += 1;
    }
    functions
}

/// Every retained call site in `content`, attributed to its enclosing
/// function. Calls outside any function body are dropped.
#[must_use]
pub fn extract_function_calls(content: &str, file_path: &str, package: &str) -> Vec<CallEdge> {
    let mut calls = Vec::new();
    let mut current: Option<(String, usize)> = None;
    let lines: Vec<&str> = content.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let mut code: &str = line;
        if is_func_header(line.trim()) {
            let block = extract_block(&lines, idx, Delimiter::Brace);
            current = parse_signature(&block.text(&lines)).map(|sig| (sig.name, block.end));
            // Only a one-line body shares the header line
            match mask_literals(line).find('{') {
                Some(open) if block.start == block.end => code = &line[open + 1..],
                _ => continue,
            }
        }

        if current.as_ref().is_some_and(|(_, end)| idx > *end) {
            current = None;
        }
        let Some((caller, _)) = current.as_ref() else {
            continue;
        };

        for site in scan_calls(code) {
            calls.push(CallEdge {
                caller: caller.clone(),
                caller_file: file_path.to_string(),
                line: line_no(idx),
                callee: site.name,
                qualifier: site.qualifier,
                package: package.to_string(),
                target_file: None,
                target_line: None,
            });
        }
    }
    calls
}

fn line_no(idx: usize) -> u32 {
    u32::try_from(idx + 1).unwrap_or(u32::MAX)
}
