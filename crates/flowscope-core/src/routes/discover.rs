//! Route discovery over file text
//!
//! Pattern families are applied in table order to the whole file. A family
//! does not report a match whose text span was already claimed by an
//! earlier family, so `HandleFunc(...).Methods(...)` is reported once, by
//! the mux family, and not again as a bare `HandleFunc`.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use super::model::{ApiRoute, RouteFramework, METHOD_ALL};
use super::path::{normalize_method, normalize_path, route_id, split_method_pattern};
use crate::pattern::compile;
use crate::scanner::{find_line_comment, line_number_at, Scanner};
use crate::structure::signature::split_top_level;

/// One handler argument: plain text, or one level of `(...)` / `{...}`
const HANDLER: &str = r"(?:[^,(){}]|\([^()]*\)|\{[^{}]*\})+";

/// How a family's capture groups map onto a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyKind {
    /// path=1, handler=2, methods list=3
    MuxMethods,
    /// prefix=1, handler=2
    PathPrefix,
    /// method=1, path=2, argument list=3 (handler is the last argument)
    Verb,
    /// pattern=1, handler=2
    StdHandle,
}

struct RouteFamily {
    kind: FamilyKind,
    framework: RouteFramework,
    regex: Regex,
}

static FAMILIES: Lazy<Vec<RouteFamily>> = Lazy::new(|| {
    let family = |kind, framework, pattern: String| RouteFamily {
        kind,
        framework,
        regex: compile(&pattern),
    };
    vec![
        family(
            FamilyKind::MuxMethods,
            RouteFramework::Mux,
            format!(r#"\.HandleFunc\(\s*"([^"]*)"\s*,\s*({HANDLER}),?\s*\)\s*\.Methods\(([^)]*)\)"#),
        ),
        family(
            FamilyKind::MuxMethods,
            RouteFramework::Mux,
            format!(r#"\.Handle\(\s*"([^"]*)"\s*,\s*({HANDLER}),?\s*\)\s*\.Methods\(([^)]*)\)"#),
        ),
        family(
            FamilyKind::PathPrefix,
            RouteFramework::Mux,
            format!(r#"\.PathPrefix\(\s*"([^"]*)"\s*\)\s*\.Handler(?:Func)?\(\s*({HANDLER}),?\s*\)"#),
        ),
        family(
            FamilyKind::Verb,
            RouteFramework::Rest,
            format!(
                r#"\.(GET|POST|PUT|PATCH|DELETE|OPTIONS|HEAD|Any)\(\s*"([^"]*)"\s*,\s*((?:{HANDLER},\s*)*{HANDLER}),?\s*\)"#
            ),
        ),
        family(
            FamilyKind::Verb,
            RouteFramework::Chi,
            format!(
                r#"\.(Get|Post|Put|Patch|Delete|Options|Head|All)\(\s*"([^"]*)"\s*,\s*((?:{HANDLER},\s*)*{HANDLER}),?\s*\)"#
            ),
        ),
        family(
            FamilyKind::StdHandle,
            RouteFramework::NetHttp,
            format!(r#"\.(?:HandleFunc|Handle)\(\s*"([^"]*)"\s*,\s*({HANDLER}),?\s*\)"#),
        ),
    ]
});

static CALL_WRAPPER: Lazy<Regex> =
    Lazy::new(|| compile(r"^([A-Za-z_][\w.]*)\s*\((.*)\)$"));

static FUNC_LITERAL: Lazy<Regex> = Lazy::new(|| compile(r"^func\s*\("));

static COMPOSITE: Lazy<Regex> = Lazy::new(|| compile(r"^([A-Za-z_][\w.]*)\s*\{"));

/// Handler name recorded for inline function literals
pub const ANONYMOUS_HANDLER: &str = "anonymous";

/// Lines shorter than this get the following lines appended to the snippet
const SHORT_SNIPPET: usize = 20;

/// Reduce a handler argument to the identifier it refers to.
///
/// `http.HandlerFunc(h.List)` and `auth(h.List)` become `h.List`,
/// `&handlers.Test{Log: l}` becomes `handlers.Test`.
#[must_use]
pub fn unwrap_handler(raw: &str) -> String {
    let text = raw.trim().trim_start_matches('&').trim();
    if FUNC_LITERAL.is_match(text) {
        return ANONYMOUS_HANDLER.to_string();
    }
    if let Some(caps) = CALL_WRAPPER.captures(text) {
        return match split_top_level(&caps[2], ',').last() {
            Some(inner) => unwrap_handler(inner),
            None => caps[1].to_string(),
        };
    }
    if let Some(caps) = COMPOSITE.captures(text) {
        return caps[1].to_string();
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All routes registered in one file's text, in family order
#[must_use]
pub fn discover_routes_in_text(content: &str, file_path: &str) -> Vec<ApiRoute> {
    let masked = mask_comments(content);
    let lines: Vec<&str> = content.split('\n').collect();
    let mut claimed: Vec<Range<usize>> = Vec::new();
    let mut routes = Vec::new();

    for family in FAMILIES.iter() {
        for caps in family.regex.captures_iter(&masked) {
            let Some(whole) = caps.get(0) else { continue };
            let span = whole.range();
            if claimed.iter().any(|c| c.start < span.end && span.start < c.end) {
                continue;
            }
            claimed.push(span.clone());

            let line = line_number_at(content, span.start);
            let snippet = snippet_at(&lines, line);
            for (method, path, handler) in dispatch(family.kind, &caps) {
                routes.push(ApiRoute {
                    id: route_id(&method, &path, &handler, file_path, line),
                    method,
                    path,
                    handler,
                    file_path: file_path.to_string(),
                    line,
                    snippet: snippet.clone(),
                    framework: family.framework,
                });
            }
        }
    }
    routes
}

/// (method, path, handler) triples for one match
fn dispatch(kind: FamilyKind, caps: &Captures<'_>) -> Vec<(String, String, String)> {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    match kind {
        FamilyKind::MuxMethods => {
            let path = normalize_path(group(1));
            let handler = unwrap_handler(group(2));
            let mut methods: Vec<String> = group(3)
                .split(',')
                .filter_map(normalize_method)
                .collect();
            if methods.is_empty() {
                methods.push(METHOD_ALL.to_string());
            }
            methods
                .into_iter()
                .map(|m| (m, path.clone(), handler.clone()))
                .collect()
        }
        FamilyKind::PathPrefix => vec![(
            METHOD_ALL.to_string(),
            normalize_path(group(1)),
            unwrap_handler(group(2)),
        )],
        FamilyKind::Verb => {
            let method = normalize_method(group(1)).unwrap_or_else(|| METHOD_ALL.to_string());
            let args = split_top_level(group(3), ',');
            let handler = args.last().map(String::as_str).map(unwrap_handler).unwrap_or_default();
            vec![(method, normalize_path(group(2)), handler)]
        }
        FamilyKind::StdHandle => {
            let (method, path) = split_method_pattern(group(1));
            vec![(
                method.unwrap_or_else(|| METHOD_ALL.to_string()),
                normalize_path(path),
                unwrap_handler(group(2)),
            )]
        }
    }
}

/// Blank out `//` comments so commented-out registrations are not matched.
/// Byte offsets are preserved.
fn mask_comments(content: &str) -> String {
    content
        .split('\n')
        .map(|line| match find_line_comment(line) {
            Some(idx) => format!("{}{}", &line[..idx], " ".repeat(line.len() - idx)),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The registration line, extended by up to two lines when it is short or
/// leaves a call open
fn snippet_at(lines: &[&str], line: u32) -> Option<String> {
    let idx = (line as usize).checked_sub(1)?;
    let first = lines.get(idx)?.trim();
    let open = first.matches('(').count() > first.matches(')').count();
    if first.len() >= SHORT_SNIPPET && !open {
        return Some(first.to_string());
    }
    let end = (idx + 3).min(lines.len());
    let joined = lines[idx..end]
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(joined)
}

/// Routes for every file under the scanner's root, keeping the first route
/// seen for each (method, path)
#[must_use]
pub fn discover_project_routes(scanner: &Scanner) -> Vec<ApiRoute> {
    let mut routes = Vec::new();

    for file in scanner.scan() {
        let content = match file.read() {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {}: {}", file.rel_path, e);
                continue;
            }
        };
        let found = discover_routes_in_text(&content, &file.rel_path);
        if !found.is_empty() {
            debug!("{}: {} routes", file.rel_path, found.len());
        }
        routes.extend(found);
    }
    dedup_routes(routes)
}

/// Drop every route whose (method, path) was already seen earlier in the list
#[must_use]
pub fn dedup_routes(routes: Vec<ApiRoute>) -> Vec<ApiRoute> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    routes
        .into_iter()
        .filter(|r| seen.insert((r.method.clone(), r.path.clone())))
        .collect()
}
